use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::schedule::months::{month_at, MONTHS_IN_YEAR};
use crate::schedule::{hours_to_time_string, MonthSegment, ScheduleView, SelectedComponent, TermSchedule};

/// Formats a component as "EECS 2030 A LECT"
pub fn format_component_name(component: &SelectedComponent) -> String {
    [
        component.course_code.as_str(),
        component.section.as_str(),
        component.component_type.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" ")
}

/// Renders one term as text: Day HH:MM-HH:MM course [location] with conflict markers
fn render_term<W: fmt::Write>(out: &mut W, term: &TermSchedule<'_>) -> fmt::Result {
    writeln!(out, "** {} **", term.label)?;

    if term.blocks.is_empty() {
        writeln!(out, "  [NO SCHEDULED MEETINGS]")?;
    }
    for block in &term.blocks {
        let marker = if term.conflicts.contains(&block.component.id) { " [CONFLICT]" } else { "" };
        let location = if block.component.location.is_empty() {
            String::new()
        } else {
            format!(" @ {}", block.component.location)
        };
        writeln!(
            out,
            "  {:<4} {}-{} {}{}{}",
            block.day.to_string(),
            hours_to_time_string(block.start_time),
            hours_to_time_string(block.end_time),
            format_component_name(block.component),
            location,
            marker
        )?;
    }

    // Components that made it into the term but not onto the timetable
    for item in &term.items {
        if !term.blocks.iter().any(|block| block.component.id == item.id) {
            writeln!(out, "  ---- {} (time {:?} not scheduled)", format_component_name(item), item.time_text)?;
        }
    }
    Ok(())
}

/// Twelve-character bar from September to August, '#' for active months
fn render_timeline_bar(segments: &[MonthSegment]) -> String {
    let mut bar = vec!['.'; MONTHS_IN_YEAR];
    for segment in segments {
        for index in segment.start..(segment.start + segment.length).min(MONTHS_IN_YEAR) {
            bar[index] = '#';
        }
    }
    bar.into_iter().collect()
}

fn render_sections<W: fmt::Write>(out: &mut W, view: &ScheduleView<'_>, include_combined: bool) -> fmt::Result {
    for term in &view.terms {
        render_term(out, term)?;
        writeln!(out)?;
    }

    if include_combined {
        if let (Some(fall), Some(winter)) = (view.term("fall"), view.term("winter")) {
            writeln!(out, "** Fall + Winter **")?;
            for term in [fall, winter] {
                writeln!(out, "  {}: {} meetings, {} conflicts", term.label, term.blocks.len(), term.conflicts.len())?;
            }
            writeln!(out)?;
        }
    }

    let header: String = (0..MONTHS_IN_YEAR)
        .map(|index| format!("{:?}", month_at(index)).chars().next().unwrap_or(' '))
        .collect();
    writeln!(out, "** Durations ({}) **", header)?;
    for timeline in &view.timelines {
        let bar = if timeline.duration.is_some() {
            render_timeline_bar(&timeline.segments)
        } else {
            "?".repeat(MONTHS_IN_YEAR)
        };
        writeln!(out, "  {} {}", bar, format_component_name(timeline.component))?;
    }
    Ok(())
}

/// Renders the text export: one section per term, an optional combined fall+winter section,
/// then a duration bar per component
pub fn render_export(view: &ScheduleView<'_>, include_combined: bool) -> Result<String> {
    let mut out = String::new();
    render_sections(&mut out, view, include_combined)?;
    Ok(out)
}

/// Writes the text export to a file
pub fn write_schedule_to_file<P: AsRef<Path>>(
    view: &ScheduleView<'_>,
    filename: P,
    include_combined: bool,
) -> Result<()> {
    fs::write(filename, render_export(view, include_combined)?)?;
    Ok(())
}

/// Prints the schedule in a readable format
pub fn print_schedule(view: &ScheduleView<'_>) -> Result<()> {
    println!("\n=== Schedule ===");
    println!("Terms: {}", view.terms.len());
    if view.has_conflicts() {
        println!("⚠️  Conflicting components ({}):", view.conflicts.len());
        for id in &view.conflicts {
            println!("  - {}", id);
        }
    }
    println!();
    print!("{}", render_export(view, false)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::derive_schedule;

    fn component(id: &str, course: &str, days: &str, time: &str, term: &str) -> SelectedComponent {
        SelectedComponent {
            id: id.to_string(),
            course_code: course.to_string(),
            course_name: String::new(),
            section: "A".to_string(),
            component_type: "LECT".to_string(),
            day_text: days.to_string(),
            time_text: time.to_string(),
            location: String::new(),
            instructor: String::new(),
            term_text: term.to_string(),
        }
    }

    #[test]
    fn component_name_skips_empty_parts() {
        let mut item = component("1", "EECS 2030", "Mon", "10:00-11:00", "F");
        item.section.clear();
        assert_eq!(format_component_name(&item), "EECS 2030 LECT");
    }

    #[test]
    fn export_marks_conflicts_and_unscheduled_items() {
        let items = vec![
            component("1", "EECS 2030", "Tue", "13:00-14:30", "F"),
            component("2", "MATH 1300", "Tue", "14:00-15:00", "F"),
            component("3", "PHIL 1000", "Wed", "TBA", "F"),
        ];
        let view = derive_schedule(&items, 8);
        let text = render_export(&view, false).unwrap();

        assert!(text.contains("** Fall **"));
        assert!(text.contains("Tue  13:00-14:30 EECS 2030 A LECT [CONFLICT]"));
        assert!(text.contains("PHIL 1000 A LECT (time \"TBA\" not scheduled)"));
        assert!(text.contains("####........ EECS 2030 A LECT"));
    }

    #[test]
    fn combined_section_needs_fall_and_winter() {
        let items = vec![component("1", "EECS 2030", "Mon", "10:00-11:00", "Full Year")];
        let view = derive_schedule(&items, 8);

        assert!(render_export(&view, true).unwrap().contains("** Fall + Winter **"));
        let fall_only = vec![component("1", "EECS 2030", "Mon", "10:00-11:00", "F")];
        let view = derive_schedule(&fall_only, 8);
        assert!(!render_export(&view, true).unwrap().contains("** Fall + Winter **"));
    }

    struct FullBuffer;

    impl fmt::Write for FullBuffer {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn write_failures_propagate() {
        let items = vec![component("1", "EECS 2030", "Mon", "10:00-11:00", "F")];
        let view = derive_schedule(&items, 8);

        assert!(render_term(&mut FullBuffer, &view.terms[0]).is_err());
        assert!(render_sections(&mut FullBuffer, &view, true).is_err());
    }

    #[test]
    fn writes_export_file() {
        let items = vec![component("1", "EECS 2030", "Mon", "10:00-11:00", "W")];
        let view = derive_schedule(&items, 8);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.txt");

        write_schedule_to_file(&view, &path, true).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("** Winter **"));
    }
}
