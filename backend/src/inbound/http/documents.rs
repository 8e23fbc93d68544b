//! Document API handlers: multipart upload, per-user listing, redirect
//! viewing, and the admin join.
//!
//! ```text
//! POST /user/docs multipart: userId, docs (≤10 files, ≤10 MiB each), names…
//! GET /admin/user/docs/{userId}
//! GET /viewDoc/{docId}
//! GET /api/userDocs/all
//! ```

use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{get, post, web, HttpResponse};
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{DocumentEntry, Error, OwnedDocuments, SignedDocument, UploadedFile};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Maximum number of files per upload request.
const MAX_FILES: usize = 10;
/// Maximum size of one uploaded file.
const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Fields extracted from one multipart upload request.
#[derive(Debug, Default)]
struct UploadForm {
    user_id: Option<String>,
    files: Vec<UploadedFile>,
    names: Vec<String>,
}

async fn read_text_field(field: &mut actix_multipart::Field) -> Result<String, Error> {
    let mut buffer = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|err| Error::invalid_request(format!("malformed multipart body: {err}")))?
    {
        buffer.extend_from_slice(&chunk);
    }
    String::from_utf8(buffer)
        .map_err(|_| Error::invalid_request("text field is not valid UTF-8"))
}

async fn read_file_field(field: &mut actix_multipart::Field) -> Result<UploadedFile, Error> {
    let original_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .map(str::to_owned)
        .ok_or_else(|| Error::invalid_request("file field is missing a filename"))?;

    let mut bytes = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|err| Error::invalid_request(format!("malformed multipart body: {err}")))?
    {
        if bytes.len() + chunk.len() > MAX_FILE_BYTES {
            return Err(Error::invalid_request("File too large")
                .with_details(json!({ "file": original_name, "maxBytes": MAX_FILE_BYTES })));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(UploadedFile {
        original_name,
        bytes,
    })
}

async fn collect_form(mut payload: Multipart) -> Result<UploadForm, Error> {
    let mut form = UploadForm::default();
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|err| Error::invalid_request(format!("malformed multipart body: {err}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("userId") => form.user_id = Some(read_text_field(&mut field).await?),
            Some("names") => form.names.push(read_text_field(&mut field).await?),
            Some("docs") => {
                if form.files.len() >= MAX_FILES {
                    return Err(Error::invalid_request("Too many files")
                        .with_details(json!({ "maxFiles": MAX_FILES })));
                }
                form.files.push(read_file_field(&mut field).await?);
            }
            // Unknown fields are drained and ignored.
            _ => {
                while field
                    .try_next()
                    .await
                    .map_err(|err| {
                        Error::invalid_request(format!("malformed multipart body: {err}"))
                    })?
                    .is_some()
                {}
            }
        }
    }
    Ok(form)
}

/// Envelope returned by `POST /user/docs`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    /// Full updated entry sequence for the user, oldest first.
    pub documents: Vec<DocumentEntry>,
}

/// Upload documents for a user.
///
/// Multipart form: a `userId` text field, up to ten `docs` file parts of at
/// most 10 MiB each, and optional repeated `names` text fields. When names
/// are given their count must match the file count.
#[utoipa::path(
    post,
    path = "/user/docs",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Documents stored", body = UploadResponse),
        (status = 400, description = "Malformed upload", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tags = ["documents"],
    operation_id = "uploadUserDocs"
)]
#[post("/user/docs")]
pub async fn upload_docs(
    state: web::Data<HttpState>,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    let form = collect_form(payload).await?;
    let user_id = form
        .user_id
        .ok_or_else(|| Error::invalid_request("userId is required"))?;
    let names = if form.names.is_empty() {
        None
    } else {
        Some(form.names)
    };
    let documents = state.documents.attach(&user_id, form.files, names).await?;
    Ok(HttpResponse::Created().json(UploadResponse {
        success: true,
        message: "Documents uploaded successfully".into(),
        documents,
    }))
}

/// Envelope returned by `GET /admin/user/docs/{userId}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDocsResponse {
    pub success: bool,
    /// Entries with short-lived retrieval URLs, oldest first.
    pub documents: Vec<SignedDocument>,
}

/// List one user's documents with presigned retrieval URLs.
#[utoipa::path(
    get,
    path = "/admin/user/docs/{userId}",
    params(("userId" = String, Path, description = "Issued user identifier")),
    responses(
        (status = 200, description = "Signed listing", body = UserDocsResponse),
        (status = 400, description = "Malformed user id", body = ErrorBody),
        (status = 404, description = "No documents for this user", body = ErrorBody),
        (status = 500, description = "Presigning failure", body = ErrorBody)
    ),
    tags = ["documents"],
    operation_id = "listUserDocs"
)]
#[get("/admin/user/docs/{userId}")]
pub async fn list_user_docs(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let documents = state.documents.list_for_user(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserDocsResponse {
        success: true,
        documents,
    }))
}

/// Redirect to a freshly presigned URL for one document.
#[utoipa::path(
    get,
    path = "/viewDoc/{docId}",
    params(("docId" = Uuid, Path, description = "Document entry identifier")),
    responses(
        (status = 302, description = "Redirect to the presigned URL"),
        (status = 404, description = "Unknown document", body = ErrorBody),
        (status = 500, description = "Presigning failure", body = ErrorBody)
    ),
    tags = ["documents"],
    operation_id = "viewDoc"
)]
#[get("/viewDoc/{docId}")]
pub async fn view_doc(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let url = state.documents.resolve(path.into_inner()).await?;
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, url))
        .finish())
}

/// Envelope returned by `GET /api/userDocs/all`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AllDocsResponse {
    pub success: bool,
    /// Every document-link record joined with its owner summary.
    pub records: Vec<OwnedDocuments>,
}

/// List every document-link record joined with its owner.
#[utoipa::path(
    get,
    path = "/api/userDocs/all",
    responses(
        (status = 200, description = "All records", body = AllDocsResponse),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["documents"],
    operation_id = "listAllDocs"
)]
#[get("/api/userDocs/all")]
pub async fn list_all_docs(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let records = state.documents.list_all_with_owners().await?;
    Ok(HttpResponse::Ok().json(AllDocsResponse {
        success: true,
        records,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{harness, seed_user};
    use actix_web::{test as actix_test, App};
    use serde_json::Value;

    const BOUNDARY: &str = "ats-test-boundary";

    fn text_part(name: &str, value: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
    }

    fn file_part(filename: &str, contents: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"docs\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n{contents}\r\n"
        )
    }

    fn multipart_request(uri: &str, parts: &[String]) -> actix_test::TestRequest {
        let mut body = parts.concat();
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        actix_test::TestRequest::post()
            .uri(uri)
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
    }

    #[actix_web::test]
    async fn upload_stores_files_and_returns_entries() {
        let fx = harness();
        let uid = seed_user(&fx.identity, "asha@example.com").await;
        let app = actix_test::init_service(
            App::new().app_data(fx.state.clone()).service(upload_docs),
        )
        .await;

        let request = multipart_request(
            "/user/docs",
            &[
                text_part("userId", uid.as_str()),
                text_part("names", "PAN"),
                text_part("names", "Aadhaar"),
                file_part("pan.pdf", "pan-bytes"),
                file_part("aadhaar.pdf", "aadhaar-bytes"),
            ],
        );
        let response = actix_test::call_service(&app, request.to_request()).await;
        assert_eq!(response.status(), 201);

        let body: Value = actix_test::read_body_json(response).await;
        let documents = body["documents"].as_array().expect("entry array");
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0]["name"], "PAN");
        assert_eq!(documents[1]["name"], "Aadhaar");
        assert_eq!(fx.storage.object_count(), 2);
    }

    #[actix_web::test]
    async fn upload_without_user_id_is_rejected() {
        let fx = harness();
        let app = actix_test::init_service(
            App::new().app_data(fx.state.clone()).service(upload_docs),
        )
        .await;

        let request = multipart_request("/user/docs", &[file_part("pan.pdf", "pan-bytes")]);
        let response = actix_test::call_service(&app, request.to_request()).await;
        assert_eq!(response.status(), 400);
        assert_eq!(fx.storage.object_count(), 0);
    }

    #[actix_web::test]
    async fn listing_and_view_redirect() {
        let fx = harness();
        let uid = seed_user(&fx.identity, "asha@example.com").await;
        let app = actix_test::init_service(
            App::new()
                .app_data(fx.state.clone())
                .service(upload_docs)
                .service(list_user_docs)
                .service(view_doc),
        )
        .await;

        let upload = multipart_request(
            "/user/docs",
            &[
                text_part("userId", uid.as_str()),
                file_part("pan.pdf", "pan-bytes"),
            ],
        );
        let uploaded = actix_test::call_service(&app, upload.to_request()).await;
        assert_eq!(uploaded.status(), 201);
        let uploaded: Value = actix_test::read_body_json(uploaded).await;
        let doc_id = uploaded["documents"][0]["id"].as_str().expect("entry id");

        let listed = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/admin/user/docs/{}", uid.as_str()))
                .to_request(),
        )
        .await;
        assert_eq!(listed.status(), 200);
        let listed: Value = actix_test::read_body_json(listed).await;
        let url = listed["documents"][0]["signedUrl"].as_str().expect("url");
        assert!(url.contains("expires"));

        let redirect = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/viewDoc/{doc_id}"))
                .to_request(),
        )
        .await;
        assert_eq!(redirect.status(), 302);
        let location = redirect
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .expect("location header");
        assert!(location.contains("expires"));
    }

    #[actix_web::test]
    async fn listing_unknown_user_is_not_found() {
        let fx = harness();
        let app = actix_test::init_service(
            App::new().app_data(fx.state.clone()).service(list_user_docs),
        )
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/admin/user/docs/ATS260829X4QZ")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), 404);
    }

    #[actix_web::test]
    async fn admin_join_lists_records_with_owners() {
        let fx = harness();
        let uid = seed_user(&fx.identity, "asha@example.com").await;
        let app = actix_test::init_service(
            App::new()
                .app_data(fx.state.clone())
                .service(upload_docs)
                .service(list_all_docs),
        )
        .await;

        let upload = multipart_request(
            "/user/docs",
            &[
                text_part("userId", uid.as_str()),
                file_part("pan.pdf", "pan-bytes"),
            ],
        );
        let uploaded = actix_test::call_service(&app, upload.to_request()).await;
        assert_eq!(uploaded.status(), 201);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/userDocs/all")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), 200);
        let body: Value = actix_test::read_body_json(response).await;
        let records = body["records"].as_array().expect("record array");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["user"]["email"], "asha@example.com");
        assert_eq!(records[0]["documents"][0]["name"], "pan.pdf");
    }
}
