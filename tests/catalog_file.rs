use std::io::Write;

use course_planner::catalog::Catalog;
use course_planner::config::PlannerConfig;
use course_planner::display::write_schedule_to_file;
use course_planner::schedule::derive_schedule;
use course_planner::working_set::WorkingSet;
use course_planner::PlannerError;

const CATALOG: &str = "\
id,course_code,course_name,section,component_type,day_text,time_text,location,instructor,term_text
1001,EECS 2030,Advanced OOP,A,LECT,Mon/Wed,10:30 - 11:50,LSB 103,R. Smith,Fall 2024 (F)
1003,MATH 1300,Calculus,M,LECT,T/Th,13:00-14:30,CLH A,J. Chen,Fall 2024 (F)
1004,MATH 1300,Calculus,M,TUTR,Tue,14:00-15:00,VH 1152,J. Chen,Fall 2024 (F)
1005,PHIL 1100,Morality,B,LECT,Wed,18:00-21:00,,A. Patel,Full Year
";

#[test]
fn loads_catalog_and_exports_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("catalog.csv");
    let mut file = std::fs::File::create(&catalog_path).unwrap();
    file.write_all(CATALOG.as_bytes()).unwrap();

    let catalog = Catalog::load(&catalog_path).unwrap();
    assert_eq!(catalog.len(), 4);

    let ids: Vec<String> = ["1003", "1004", "1005"].iter().map(|s| s.to_string()).collect();
    let selection = WorkingSet::hydrate(&ids, &catalog).unwrap();
    let view = derive_schedule(selection.items(), 8);

    let fall = view.term("fall").unwrap();
    assert_eq!(fall.items.len(), 3);
    assert!(fall.conflicts.contains("1003"));
    assert!(fall.conflicts.contains("1004"));
    assert!(!fall.conflicts.contains("1005"));

    let export_path = dir.path().join("schedule.txt");
    write_schedule_to_file(&view, &export_path, true).unwrap();
    let text = std::fs::read_to_string(&export_path).unwrap();
    assert!(text.contains("** Fall **"));
    assert!(text.contains("** Winter **"));
    assert!(text.contains("** Fall + Winter **"));
}

#[test]
fn missing_catalog_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalog::load(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, PlannerError::Csv(_) | PlannerError::Io(_)));
}

#[test]
fn config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner.toml");
    std::fs::write(&path, "port = 9090\npalette_size = 5\n").unwrap();

    let config = PlannerConfig::from_file(&path).unwrap();
    assert_eq!(config.port, 9090);
    assert_eq!(config.palette_size, 5);
}
