use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use log::{info, warn};

use crate::catalog::Catalog;
use crate::config::PlannerConfig;
use crate::display::render_export;
use crate::schedule::derive_schedule;
use crate::working_set::WorkingSet;

/// Session entry holding the ordered ids of the selected components
const SELECTION_KEY: &str = "selection";

/// Read-only state shared by all workers
pub struct AppState {
    pub catalog: Catalog,
    pub palette_size: usize,
}

/// Rebuilds the working set from the session; ids no longer in the catalog are dropped
fn load_selection(session: &Session, state: &AppState) -> Result<WorkingSet> {
    let ids: Vec<String> = session.get(SELECTION_KEY)?.unwrap_or_default();
    let mut selection = WorkingSet::new();
    for id in &ids {
        match state.catalog.get(id) {
            Some(component) => {
                selection.add(component.clone());
            }
            None => warn!("Dropping stale selection id {}", id),
        }
    }
    Ok(selection)
}

fn store_selection(session: &Session, selection: &WorkingSet) -> Result<()> {
    session.insert(SELECTION_KEY, selection.ids())?;
    Ok(())
}

// Catalog endpoint
async fn get_catalog(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.catalog.components()))
}

// Selection endpoints
async fn get_selection(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    let selection = load_selection(&session, &state)?;
    Ok(HttpResponse::Ok().json(selection.items()))
}

async fn add_to_selection(
    id: web::Path<String>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let Some(component) = state.catalog.get(&id) else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({"error": format!("Unknown component: {}", id)})));
    };

    let mut selection = load_selection(&session, &state)?;
    let added = selection.add(component.clone());
    store_selection(&session, &selection)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "added": added, "count": selection.len()})))
}

async fn remove_from_selection(
    id: web::Path<String>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut selection = load_selection(&session, &state)?;
    let removed = selection.remove(&id);
    store_selection(&session, &selection)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "removed": removed, "count": selection.len()})))
}

async fn clear_selection(session: Session) -> Result<HttpResponse> {
    store_selection(&session, &WorkingSet::new())?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "count": 0})))
}

async fn replace_selection(
    ids: web::Json<Vec<String>>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    match WorkingSet::hydrate(&ids, &state.catalog) {
        Ok(selection) => {
            store_selection(&session, &selection)?;
            Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "count": selection.len()})))
        }
        Err(e) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": e.to_string()
        }))),
    }
}

// Schedule endpoint
async fn get_schedule(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    let selection = load_selection(&session, &state)?;
    let view = derive_schedule(selection.items(), state.palette_size);
    Ok(HttpResponse::Ok().json(&view))
}

// Text export endpoint
async fn get_export(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    let selection = load_selection(&session, &state)?;
    let view = derive_schedule(selection.items(), state.palette_size);
    let text = render_export(&view, true).map_err(actix_web::error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(text))
}

/// Registers the API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/catalog", web::get().to(get_catalog))
        .route("/api/selection", web::get().to(get_selection))
        .route("/api/selection", web::put().to(replace_selection))
        .route("/api/selection", web::delete().to(clear_selection))
        .route("/api/selection/{id}", web::post().to(add_to_selection))
        .route("/api/selection/{id}", web::delete().to(remove_from_selection))
        .route("/api/schedule", web::get().to(get_schedule))
        .route("/api/export", web::get().to(get_export));
}

/// Cookie-backed session storage for the working set
pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(false)
        .build()
}

pub async fn start_server(config: PlannerConfig, catalog: Catalog) -> std::io::Result<()> {
    let key = match &config.session_key {
        Some(secret) => Key::from(secret.as_bytes()),
        None => {
            warn!("No session_key configured; selections won't survive a restart");
            Key::generate()
        }
    };

    let app_state = web::Data::new(AppState {
        catalog,
        palette_size: config.palette_size,
    });

    info!("Listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(session_middleware(key.clone()))
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::{http::StatusCode, test};

    use crate::schedule::SelectedComponent;

    fn component(id: &str, course: &str, days: &str, time: &str) -> SelectedComponent {
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
            term_text: "F".to_string(),
        }
    }

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState {
            catalog: Catalog::new(vec![
                component("1", "EECS 2030", "Tue", "13:00-14:30"),
                component("2", "MATH 1300", "Tue", "14:00-15:00"),
            ]),
            palette_size: 8,
        })
    }

    fn session_cookie<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Cookie<'static> {
        resp.response()
            .cookies()
            .next()
            .expect("session cookie set")
            .into_owned()
    }

    #[actix_web::test]
    async fn selection_round_trip_produces_conflicting_schedule() {
        let app = test::init_service(
            App::new()
                .app_data(state())
                .wrap(session_middleware(Key::generate()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/selection/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = session_cookie(&resp);

        let req = test::TestRequest::post()
            .uri("/api/selection/2")
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let cookie = session_cookie(&resp);

        let req = test::TestRequest::get()
            .uri("/api/schedule")
            .cookie(cookie)
            .to_request();
        let view: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(view["terms"][0]["key"], "fall");
        assert_eq!(view["terms"][0]["blocks"].as_array().unwrap().len(), 2);
        assert_eq!(view["conflicts"], serde_json::json!(["1", "2"]));
        assert_eq!(view["colors"], serde_json::json!({"EECS 2030": 0, "MATH 1300": 1}));
    }

    #[actix_web::test]
    async fn unknown_component_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(state())
                .wrap(session_middleware(Key::generate()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/selection/99").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::put()
            .uri("/api/selection")
            .set_json(vec!["1", "99"])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn empty_session_has_empty_schedule() {
        let app = test::init_service(
            App::new()
                .app_data(state())
                .wrap(session_middleware(Key::generate()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/selection").to_request();
        let items: Vec<SelectedComponent> = test::call_and_read_body_json(&app, req).await;
        assert!(items.is_empty());

        let req = test::TestRequest::get().uri("/api/schedule").to_request();
        let view: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(view["terms"], serde_json::json!([]));
    }
}
