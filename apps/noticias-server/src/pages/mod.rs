//! Server-rendered pages.
//!
//! Access to the editing pages is enforced by [`RouteGuard`](crate::middleware::guard::RouteGuard);
//! the handlers still take an explicit [`Identity`] so the editor is known.

mod views;

use actix_multipart::Multipart;
use actix_web::{
    HttpResponse, ResponseError,
    cookie::Cookie,
    http::{StatusCode, header},
    web,
};

use noticias_core::DomainError;
use noticias_core::domain::NoticiaSubmission;
use noticias_core::guard::HOME_PATH;

use crate::handlers::form::read_submission;
use crate::middleware::error::AppError;
use crate::middleware::session::{Identity, OptionalIdentity, SESSION_COOKIE};
use crate::state::AppState;

use views::FormView;

const MSG_CREATE_FAILED: &str = "Erro ao criar notícia.";
const MSG_UPDATE_FAILED: &str = "Erro ao atualizar a notícia.";
const MSG_DELETE_FAILED: &str = "Erro ao excluir a notícia.";

/// Register the page routes.
pub fn configure_pages(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/noticia/{id}", web::get().to(detail))
        .route("/noticia/{id}/excluir", web::post().to(delete))
        .route("/criar-noticia", web::get().to(create_form))
        .route("/criar-noticia", web::post().to(create))
        .route("/editar-noticia/{id}", web::get().to(edit_form))
        .route("/editar-noticia/{id}", web::post().to(edit))
        .route("/login", web::get().to(login))
        .route("/sair", web::post().to(logout));
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(mime::TEXT_HTML_UTF_8)
        .body(body)
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// GET /
async fn home(state: web::Data<AppState>, identity: OptionalIdentity) -> HttpResponse {
    let identity = identity.0.as_ref();

    match state.noticias.list().await {
        Ok(noticias) => html(StatusCode::OK, views::home(&noticias, identity)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load noticias for home page");
            html(StatusCode::INTERNAL_SERVER_ERROR, views::home_error(identity))
        }
    }
}

/// GET /noticia/{id}
async fn detail(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
) -> HttpResponse {
    let identity = identity.0.as_ref();

    match state.noticias.get(&path).await {
        Ok(noticia) => html(StatusCode::OK, views::detail(&noticia, identity)),
        Err(e) => detail_failure(e, identity),
    }
}

fn detail_failure(err: DomainError, identity: Option<&Identity>) -> HttpResponse {
    let status = AppError::from_domain(err, views::MSG_NOTICIA_UNAVAILABLE).status_code();
    if status.is_server_error() {
        tracing::error!(%status, "Failed to load noticia page");
    }
    html(status, views::detail_error(identity))
}

/// Text fields of a submission, kept to re-fill a rejected form.
fn text_only(submission: &NoticiaSubmission) -> NoticiaSubmission {
    NoticiaSubmission {
        titulo: submission.titulo.clone(),
        conteudo: submission.conteudo.clone(),
        imagem: None,
    }
}

fn create_view<'a>(titulo: &'a str, conteudo: &'a str, error: Option<&'a str>) -> FormView<'a> {
    FormView {
        heading: "Criar Notícia",
        action: "/criar-noticia".to_string(),
        submit: "Publicar",
        titulo,
        conteudo,
        current_image: None,
        image_required: true,
        error,
    }
}

/// GET /criar-noticia
async fn create_form(identity: Identity) -> HttpResponse {
    html(
        StatusCode::OK,
        views::form(&create_view("", "", None), Some(&identity)),
    )
}

/// POST /criar-noticia
async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    payload: Multipart,
) -> HttpResponse {
    let submission = match read_submission(payload, state.uploads.max_bytes).await {
        Ok(submission) => submission,
        Err(e) => return create_failure(&NoticiaSubmission::default(), e, &identity),
    };
    let echo = text_only(&submission);

    match state.noticias.create(submission).await {
        Ok(id) => {
            tracing::info!(noticia_id = id, editor = %identity.subject, "Noticia created via form");
            see_other(&format!("/noticia/{id}"))
        }
        Err(e) => create_failure(&echo, AppError::from_domain(e, MSG_CREATE_FAILED), &identity),
    }
}

fn create_failure(echo: &NoticiaSubmission, err: AppError, identity: &Identity) -> HttpResponse {
    let view = create_view(
        echo.titulo.as_deref().unwrap_or_default(),
        echo.conteudo.as_deref().unwrap_or_default(),
        Some(err.message()),
    );
    html(err.status_code(), views::form(&view, Some(identity)))
}

fn edit_view<'a>(
    id: i32,
    titulo: &'a str,
    conteudo: &'a str,
    current_image: &'a str,
    error: Option<&'a str>,
) -> FormView<'a> {
    FormView {
        heading: "Editar Notícia",
        action: format!("/editar-noticia/{id}"),
        submit: "Salvar",
        titulo,
        conteudo,
        current_image: Some(current_image),
        image_required: false,
        error,
    }
}

/// GET /editar-noticia/{id}
async fn edit_form(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> HttpResponse {
    match state.noticias.get(&path).await {
        Ok(noticia) => {
            let view = edit_view(
                noticia.id,
                &noticia.titulo,
                &noticia.conteudo,
                &noticia.imagem,
                None,
            );
            html(StatusCode::OK, views::form(&view, Some(&identity)))
        }
        Err(e) => detail_failure(e, Some(&identity)),
    }
}

/// POST /editar-noticia/{id}
async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    payload: Multipart,
) -> HttpResponse {
    let current = match state.noticias.get(&path).await {
        Ok(noticia) => noticia,
        Err(e) => return detail_failure(e, Some(&identity)),
    };

    let result = match read_submission(payload, state.uploads.max_bytes).await {
        Ok(submission) => {
            let echo = text_only(&submission);
            state
                .noticias
                .update(&path, submission)
                .await
                .map_err(|e| (echo, AppError::from_domain(e, MSG_UPDATE_FAILED)))
        }
        Err(e) => Err((NoticiaSubmission::default(), e)),
    };

    match result {
        Ok(id) => {
            tracing::info!(noticia_id = id, editor = %identity.subject, "Noticia updated via form");
            see_other(&format!("/noticia/{id}"))
        }
        Err((echo, err)) => {
            let view = edit_view(
                current.id,
                echo.titulo.as_deref().unwrap_or(&current.titulo),
                echo.conteudo.as_deref().unwrap_or(&current.conteudo),
                &current.imagem,
                Some(err.message()),
            );
            html(err.status_code(), views::form(&view, Some(&identity)))
        }
    }
}

/// POST /noticia/{id}/excluir
async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> HttpResponse {
    match state.noticias.delete(&path).await {
        Ok(id) => {
            tracing::info!(noticia_id = id, editor = %identity.subject, "Noticia deleted via form");
            see_other(HOME_PATH)
        }
        Err(e) => {
            let err = AppError::from_domain(e, MSG_DELETE_FAILED);
            html(err.status_code(), views::detail_error(Some(&identity)))
        }
    }
}

/// GET /login
async fn login(state: web::Data<AppState>) -> HttpResponse {
    html(
        StatusCode::OK,
        views::login(state.login_provider_url.as_deref()),
    )
}

/// POST /sair - drop the session cookie.
async fn logout(identity: OptionalIdentity) -> HttpResponse {
    if let Some(identity) = identity.0 {
        tracing::info!(subject = %identity.subject, "Session cleared");
    }

    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();

    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, HOME_PATH))
        .cookie(cookie)
        .finish()
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::Cookie;
    use actix_web::http::{StatusCode, header};
    use actix_web::test;

    use crate::middleware::session::SESSION_COOKIE;
    use crate::test_support::{MultipartBody, TestContext, full_submission, test_app};

    fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> &str {
        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    fn body_text(bytes: &[u8]) -> String {
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn test_guard_redirects_signed_out_requester() {
        let ctx = TestContext::new();
        let app = test_app!(ctx.state).await;

        for uri in ["/criar-noticia", "/editar-noticia/1"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
            assert_eq!(location(&resp), "/login");
        }

        let req = test::TestRequest::post()
            .uri("/noticia/1/excluir")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/login");
    }

    #[actix_web::test]
    async fn test_guard_redirects_signed_in_requester_away_from_login() {
        let ctx = TestContext::new();
        let app = test_app!(ctx.state).await;

        let req = test::TestRequest::get()
            .uri("/login")
            .cookie(Cookie::new(SESSION_COOKIE, ctx.token()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/");

        let req = test::TestRequest::get().uri("/login").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_text(&test::read_body(resp).await);
        assert!(body.contains("https://accounts.example.com/signin"));
    }

    #[actix_web::test]
    async fn test_create_form_flow() {
        let ctx = TestContext::new();
        let app = test_app!(ctx.state).await;
        let session = Cookie::new(SESSION_COOKIE, ctx.token());

        let req = test::TestRequest::get()
            .uri("/criar-noticia")
            .cookie(session.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let (content_type, body) = full_submission("Hello", "World");
        let req = test::TestRequest::post()
            .uri("/criar-noticia")
            .cookie(session.clone())
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/noticia/1");

        let req = test::TestRequest::get()
            .uri("/noticia/1")
            .cookie(session)
            .to_request();
        let body = body_text(&test::call_and_read_body(&app, req).await);
        assert!(body.contains("<h1>Hello</h1>"));
        assert!(body.contains("/editar-noticia/1"));

        let req = test::TestRequest::get().uri("/noticia/1").to_request();
        let body = body_text(&test::call_and_read_body(&app, req).await);
        assert!(!body.contains("/editar-noticia/1"));

        let req = test::TestRequest::get().uri("/").to_request();
        let body = body_text(&test::call_and_read_body(&app, req).await);
        assert!(body.contains("Últimas Notícias"));
        assert!(body.contains("Hello"));
    }

    #[actix_web::test]
    async fn test_create_form_rerenders_with_error() {
        let ctx = TestContext::new();
        let app = test_app!(ctx.state).await;

        let (content_type, body) = MultipartBody::new()
            .text("titulo", "Sem imagem")
            .text("conteudo", "Texto")
            .finish();
        let req = test::TestRequest::post()
            .uri("/criar-noticia")
            .cookie(Cookie::new(SESSION_COOKIE, ctx.token()))
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = body_text(&test::read_body(resp).await);
        assert!(body.contains("Todos os campos são obrigatórios."));
        assert!(body.contains(r#"value="Sem imagem""#));
    }

    #[actix_web::test]
    async fn test_edit_and_delete_flow() {
        let ctx = TestContext::new();
        let app = test_app!(ctx.state).await;
        let session = Cookie::new(SESSION_COOKIE, ctx.token());

        let (content_type, body) = full_submission("Hello", "World");
        let req = test::TestRequest::post()
            .uri("/criar-noticia")
            .cookie(session.clone())
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get()
            .uri("/editar-noticia/1")
            .cookie(session.clone())
            .to_request();
        let body = body_text(&test::call_and_read_body(&app, req).await);
        assert!(body.contains(r#"value="Hello""#));
        assert!(body.contains("Imagem atual"));

        let (content_type, body) = MultipartBody::new()
            .text("titulo", "Hello 2")
            .text("conteudo", "World 2")
            .finish();
        let req = test::TestRequest::post()
            .uri("/editar-noticia/1")
            .cookie(session.clone())
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/noticia/1");

        let req = test::TestRequest::post()
            .uri("/noticia/1/excluir")
            .cookie(session)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/");

        let req = test::TestRequest::get().uri("/noticia/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_text(&test::read_body(resp).await);
        assert!(body.contains("Erro ao carregar ou notícia não encontrada."));
    }

    #[actix_web::test]
    async fn test_detail_with_invalid_id() {
        let ctx = TestContext::new();
        let app = test_app!(ctx.state).await;

        let req = test::TestRequest::get().uri("/noticia/abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_logout_clears_cookie() {
        let ctx = TestContext::new();
        let app = test_app!(ctx.state).await;

        let req = test::TestRequest::post()
            .uri("/sair")
            .cookie(Cookie::new(SESSION_COOKIE, ctx.token()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let removed = resp
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .unwrap();
        assert_eq!(removed.value(), "");
    }
}
