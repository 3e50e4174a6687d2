//! Task and evidence lifecycle through the REST surface.

use super::helpers::{Api, api, task_uri, tasks_uri};
use axum::http::{Method, StatusCode};
use eyre::Result;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_task_and_evidence_lifecycle(#[future] api: Api) -> Result<()> {
    let api = api.await;
    let org = api.acme.organization_id;

    let (status, created) = api
        .send(
            Method::POST,
            &tasks_uri(org),
            Some(json!({
                "controlId": api.acme.control_id,
                "name": "Write access control policy",
                "category": "POLICY",
            })),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "OPEN");
    assert_eq!(created["description"], Value::Null);
    assert_eq!(created["organizationId"], org.to_string());
    let task_id = created["id"].as_str().unwrap_or_default().to_owned();

    let (status, details) = api.send(Method::GET, &task_uri(org, &task_id), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["evidence"], json!([]));
    assert_eq!(details["name"], "Write access control policy");

    let (status, evidence) = api
        .send(
            Method::POST,
            &format!("{}/evidence", task_uri(org, &task_id)),
            Some(json!({ "type": "DOCUMENT", "note": "Signed PDF" })),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(evidence["type"], "DOCUMENT");
    assert_eq!(evidence["taskId"], task_id.as_str());

    let (_, details) = api.send(Method::GET, &task_uri(org, &task_id), None).await?;
    assert_eq!(details["evidence"].as_array().map(Vec::len), Some(1));

    let (status, body) = api
        .send(Method::DELETE, &task_uri(org, &task_id), None)
        .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = api.send(Method::GET, &task_uri(org, &task_id), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task not found");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn patch_updates_and_clears_fields(#[future] api: Api) -> Result<()> {
    let api = api.await;
    let org = api.acme.organization_id;
    let (_, created) = api
        .send(
            Method::POST,
            &tasks_uri(org),
            Some(json!({
                "controlId": api.acme.control_id,
                "name": "Draft",
                "description": "to be cleared",
                "category": "TRAINING",
                "status": "BLOCKED",
            })),
        )
        .await?;
    assert_eq!(created["status"], "BLOCKED");
    let task_id = created["id"].as_str().unwrap_or_default().to_owned();

    let (status, patched) = api
        .send(
            Method::PATCH,
            &task_uri(org, &task_id),
            Some(json!({ "status": "DONE", "description": null })),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["status"], "DONE");
    assert_eq!(patched["description"], Value::Null);
    assert_eq!(patched["name"], "Draft");
    assert_eq!(patched["createdAt"], created["createdAt"]);

    let (status, body) = api
        .send(Method::PATCH, &task_uri(org, &task_id), Some(json!({})))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No fields provided to update");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_paginates_filters_and_clamps(#[future] api: Api) -> Result<()> {
    let api = api.await;
    let org = api.acme.organization_id;
    for name in ["Vendor review", "Firewall audit", "Backup restore test"] {
        api.create_task(&api.acme, name).await?;
    }

    let (status, page) = api
        .send(Method::GET, &format!("{}?limit=2", tasks_uri(org)), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 3);
    assert_eq!(page["limit"], 2);
    assert_eq!(page["offset"], 0);
    assert_eq!(page["items"][0]["name"], "Backup restore test");
    assert_eq!(page["items"].as_array().map(Vec::len), Some(2));

    let (_, clamped) = api
        .send(
            Method::GET,
            &format!("{}?limit=0&offset=-10", tasks_uri(org)),
            None,
        )
        .await?;
    assert_eq!(clamped["limit"], 1);
    assert_eq!(clamped["offset"], 0);

    let (_, oversized) = api
        .send(Method::GET, &format!("{}?limit=1000", tasks_uri(org)), None)
        .await?;
    assert_eq!(oversized["limit"], 100);

    let (_, searched) = api
        .send(
            Method::GET,
            &format!("{}?search=FIREWALL&category=POLICY", tasks_uri(org)),
            None,
        )
        .await?;
    assert_eq!(searched["total"], 1);
    assert_eq!(searched["items"][0]["name"], "Firewall audit");

    let (_, by_status) = api
        .send(Method::GET, &format!("{}?status=DONE", tasks_uri(org)), None)
        .await?;
    assert_eq!(by_status["total"], 0);
    assert_eq!(by_status["items"], json!([]));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn evidence_delete_is_nested_under_its_task(#[future] api: Api) -> Result<()> {
    let api = api.await;
    let org = api.acme.organization_id;
    let task_id = api.create_task(&api.acme, "Encrypt laptops").await?;
    let sibling_id = api.create_task(&api.acme, "Encrypt phones").await?;
    let (_, evidence) = api
        .send(
            Method::POST,
            &format!("{}/evidence", task_uri(org, &task_id)),
            Some(json!({ "type": "SCREENSHOT" })),
        )
        .await?;
    assert_eq!(evidence["note"], Value::Null);
    let evidence_id = evidence["id"].as_str().unwrap_or_default().to_owned();

    let (status, body) = api
        .send(
            Method::DELETE,
            &format!("{}/evidence/{evidence_id}", task_uri(org, &sibling_id)),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Evidence not found");

    let (status, _) = api
        .send(
            Method::DELETE,
            &format!("{}/evidence/{evidence_id}", task_uri(org, &task_id)),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn health_reports_ok(#[future] api: Api) -> Result<()> {
    let api = api.await;
    let (status, body) = api.send(Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
    Ok(())
}
