//! Student handlers
//!
//! Each handler maps one request shape to one store call and answers with
//! a rendered page or a redirect.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};

use crate::config::AppState;
use crate::error::AppError;
use crate::http;
use crate::logger;
use crate::model::{StudentId, StudentInput};
use crate::store::StoreError;
use crate::views::{self, FormMode};

type HandlerResult = Result<Response<Full<Bytes>>, AppError>;

/// Resolve the `:id` segment; anything that is not a valid id is unknown
pub fn parse_id(raw: Option<&str>) -> Result<StudentId, AppError> {
    let raw = raw.unwrap_or_default();
    StudentId::parse(raw).ok_or_else(|| AppError::NotFound(format!("Student {raw}")))
}

/// `GET /students`
pub async fn list(state: &AppState, is_head: bool) -> HandlerResult {
    let students = state.students.list_all().await;
    logger::log_debug(&format!("Listing {} students", students.len()));
    Ok(http::build_html_response(
        StatusCode::OK,
        views::list_page(&students),
        is_head,
    ))
}

/// `GET /students/add`
pub fn add_form(is_head: bool) -> HandlerResult {
    Ok(http::build_html_response(
        StatusCode::OK,
        views::form_page(FormMode::Add, &StudentInput::default(), None),
        is_head,
    ))
}

/// `POST /students`
pub async fn create<B>(req: Request<B>, state: &AppState) -> HandlerResult
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let input: StudentInput = http::decode_body(req, state.config.http.max_body_size).await?;

    match state.students.insert(&input).await {
        Ok(id) => {
            logger::log_info(&format!("Created student {id}"));
            Ok(http::build_redirect_response("/students"))
        }
        Err(StoreError::Validation(errors)) => {
            logger::log_debug(&format!("Rejected new student: {errors}"));
            Ok(http::build_html_response(
                StatusCode::BAD_REQUEST,
                views::form_page(FormMode::Add, &input, Some(&errors)),
                false,
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// `GET /students/:id`
pub async fn detail(state: &AppState, id: StudentId, is_head: bool) -> HandlerResult {
    let student = state
        .students
        .find_by_id(id)
        .await
        .ok_or(StoreError::NotFound(id))?;

    Ok(http::build_html_response(
        StatusCode::OK,
        views::detail_page(&student),
        is_head,
    ))
}

/// `GET /students/:id/edit`
pub async fn edit_form(state: &AppState, id: StudentId, is_head: bool) -> HandlerResult {
    let student = state
        .students
        .find_by_id(id)
        .await
        .ok_or(StoreError::NotFound(id))?;

    Ok(http::build_html_response(
        StatusCode::OK,
        views::form_page(FormMode::Edit(id), &StudentInput::from(&student), None),
        is_head,
    ))
}

/// `POST /students/:id`
pub async fn update<B>(req: Request<B>, state: &AppState, id: StudentId) -> HandlerResult
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let input: StudentInput = http::decode_body(req, state.config.http.max_body_size).await?;

    match state.students.update_by_id(id, &input).await {
        Ok(_) => {
            logger::log_info(&format!("Updated student {id}"));
            Ok(http::build_redirect_response(&format!("/students/{id}")))
        }
        Err(StoreError::Validation(errors)) => {
            // Re-render with the stored values under whatever was submitted
            let mut values = state
                .students
                .find_by_id(id)
                .await
                .as_ref()
                .map(StudentInput::from)
                .unwrap_or_default();
            if input.name.is_some() {
                values.name = input.name;
            }
            if input.age.is_some() {
                values.age = input.age;
            }
            if input.grade.is_some() {
                values.grade = input.grade;
            }

            Ok(http::build_html_response(
                StatusCode::BAD_REQUEST,
                views::form_page(FormMode::Edit(id), &values, Some(&errors)),
                false,
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// `GET /students/:id/delete`
pub async fn delete(state: &AppState, id: StudentId) -> HandlerResult {
    state.students.delete_by_id(id).await?;
    logger::log_info(&format!("Deleted student {id}"));
    Ok(http::build_redirect_response("/students"))
}
