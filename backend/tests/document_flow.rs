//! Document upload, listing, and retrieval through the full router.

mod common;

use actix_web::http::header;
use actix_web::test as actix_test;
use backend::server::build_app;
use serde_json::{json, Value};

use common::test_parts;

const BOUNDARY: &str = "ats-doc-boundary";

fn text_part(name: &str, value: &str) -> String {
    format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
}

fn file_part(filename: &str, contents: &str) -> String {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"docs\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n{contents}\r\n"
    )
}

fn multipart_request(parts: &[String]) -> actix_test::TestRequest {
    let mut body = parts.concat();
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    actix_test::TestRequest::post()
        .uri("/user/docs")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

async fn signup<S, B>(app: &S) -> String
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/newUser")
            .set_json(json!({
                "name": "Asha Rao",
                "email": "asha@example.com",
                "phone": "9876500000",
                "state": "Kerala",
                "password": "s3cret",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), 201);
    let body: Value = actix_test::read_body_json(response).await;
    body["user"]["uid"].as_str().expect("issued uid").to_owned()
}

#[actix_web::test]
async fn upload_list_view_and_admin_join() {
    let parts = test_parts();
    let app = actix_test::init_service(build_app(
        parts.http_state.clone(),
        parts.ws_state.clone(),
        parts.health_state.clone(),
    ))
    .await;
    let uid = signup(&app).await;

    let uploaded = actix_test::call_service(
        &app,
        multipart_request(&[
            text_part("userId", &uid),
            text_part("names", "PAN"),
            text_part("names", "Aadhaar"),
            file_part("pan.pdf", "pan-bytes"),
            file_part("aadhaar.pdf", "aadhaar-bytes"),
        ])
        .to_request(),
    )
    .await;
    assert_eq!(uploaded.status(), 201);
    let uploaded: Value = actix_test::read_body_json(uploaded).await;
    let documents = uploaded["documents"].as_array().expect("entries");
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0]["name"], "PAN");
    assert_eq!(parts.storage.object_count(), 2);

    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/admin/user/docs/{uid}"))
            .to_request(),
    )
    .await;
    assert_eq!(listed.status(), 200);
    let listed: Value = actix_test::read_body_json(listed).await;
    let signed = listed["documents"].as_array().expect("signed entries");
    assert_eq!(signed.len(), 2);
    assert!(signed[0]["signedUrl"]
        .as_str()
        .is_some_and(|url| url.contains("expires")));

    let doc_id = documents[1]["id"].as_str().expect("entry id");
    let redirect = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/viewDoc/{doc_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(redirect.status(), 302);
    assert!(redirect.headers().contains_key(header::LOCATION));

    let all = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/userDocs/all")
            .to_request(),
    )
    .await;
    assert_eq!(all.status(), 200);
    let all: Value = actix_test::read_body_json(all).await;
    assert_eq!(all["records"][0]["user"]["uid"], uid);
}

#[actix_web::test]
async fn second_batch_appends_to_the_same_record() {
    let parts = test_parts();
    let app = actix_test::init_service(build_app(
        parts.http_state.clone(),
        parts.ws_state.clone(),
        parts.health_state.clone(),
    ))
    .await;
    let uid = signup(&app).await;

    for filename in ["first.pdf", "second.pdf"] {
        let response = actix_test::call_service(
            &app,
            multipart_request(&[text_part("userId", &uid), file_part(filename, "bytes")])
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), 201);
    }

    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/admin/user/docs/{uid}"))
            .to_request(),
    )
    .await;
    let listed: Value = actix_test::read_body_json(listed).await;
    let names: Vec<_> = listed["documents"]
        .as_array()
        .expect("entries")
        .iter()
        .map(|entry| entry["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, ["first.pdf", "second.pdf"]);
}

#[actix_web::test]
async fn malformed_user_id_and_unknown_document_fail_cleanly() {
    let parts = test_parts();
    let app = actix_test::init_service(build_app(
        parts.http_state.clone(),
        parts.ws_state.clone(),
        parts.health_state.clone(),
    ))
    .await;

    let bad_upload = actix_test::call_service(
        &app,
        multipart_request(&[
            text_part("userId", "not-a-uid"),
            file_part("pan.pdf", "pan-bytes"),
        ])
        .to_request(),
    )
    .await;
    assert_eq!(bad_upload.status(), 400);
    assert_eq!(parts.storage.object_count(), 0);

    let unknown_doc = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/viewDoc/3fa85f64-5717-4562-b3fc-2c963f66afa6")
            .to_request(),
    )
    .await;
    assert_eq!(unknown_doc.status(), 404);
}
