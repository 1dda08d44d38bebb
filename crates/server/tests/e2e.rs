mod support;

use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use service::employee::{Employee, Gender};
use tokio::net::TcpListener;

use support::{app, seed, test_state};

struct TestApp {
    base_url: String,
    state: server::AppState,
    seeded: Vec<Employee>,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Serve the router on an ephemeral port over a seeded in-memory database.
async fn start_server() -> anyhow::Result<TestApp> {
    let state = test_state().await?;
    let seeded = seed(&state).await?;

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    let router = app(state.clone());
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url, state, seeded })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_get_all_returns_seeded_employees() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/employees")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let list: Vec<Employee> = res.json().await?;
    assert_eq!(list, app.seeded);
    Ok(())
}

#[tokio::test]
async fn e2e_get_by_id() -> anyhow::Result<()> {
    let app = start_server().await?;
    let given = &app.seeded[0];
    let res = client().get(app.url(&format!("/employees/{}", given.id))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["id"], given.id);
    assert_eq!(body["name"], "John Smith");
    assert_eq!(body["age"], 32);
    assert_eq!(body["gender"], "MALE");
    assert_eq!(body["salary"], 5000.0);
    Ok(())
}

#[tokio::test]
async fn e2e_get_by_gender() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/employees")).query(&[("gender", "FEMALE")]).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let list: Vec<Employee> = res.json().await?;
    let expected: Vec<Employee> =
        app.seeded.iter().filter(|e| e.gender == Gender::Female).cloned().collect();
    assert_eq!(list, expected);
    assert_eq!(list.len(), 2);
    Ok(())
}

#[tokio::test]
async fn e2e_create_with_string_numbers() -> anyhow::Result<()> {
    let app = start_server().await?;
    for e in &app.seeded {
        app.state.employees.delete(e.id).await?;
    }

    let res = client()
        .post(app.url("/employees"))
        .json(&json!({"name": "New Employee", "age": "18", "gender": "FEMALE", "salary": "5000.0"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body: serde_json::Value = res.json().await?;
    assert!(body["id"].is_number());
    assert_eq!(body["name"], "New Employee");
    assert_eq!(body["age"], 18);
    assert_eq!(body["gender"], "FEMALE");
    assert_eq!(body["salary"], 5000.0);

    let stored = app.state.employees.find_all().await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "New Employee");
    assert_eq!(stored[0].age, 18);
    assert_eq!(stored[0].gender, Gender::Female);
    assert_eq!(stored[0].salary, 5000.0);
    Ok(())
}

#[tokio::test]
async fn e2e_update_salary() -> anyhow::Result<()> {
    let app = start_server().await?;
    let mut given = app.seeded[0].clone();
    given.salary = 9_999_999.0;

    let res = client()
        .put(app.url(&format!("/employees/{}", given.id)))
        .json(&given)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated: Employee = res.json().await?;
    assert_eq!(updated, given);

    let stored = app.state.employees.find_all().await?;
    assert_eq!(stored.len(), 5);
    assert_eq!(stored[0], given);
    Ok(())
}

#[tokio::test]
async fn e2e_delete_employee() -> anyhow::Result<()> {
    let app = start_server().await?;
    let id = app.seeded[0].id;
    let res = client().delete(app.url(&format!("/employees/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    assert_eq!(app.state.employees.count().await?, 4);
    assert_eq!(app.state.employees.find_by_id(id).await?, None);

    let res = client().delete(app.url(&format!("/employees/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_get_by_page() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .get(app.url("/employees"))
        .query(&[("pageIndex", "2"), ("pageSize", "2")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let page: Vec<Employee> = res.json().await?;
    assert_eq!(page, app.seeded[2..4].to_vec());
    Ok(())
}

#[tokio::test]
async fn e2e_company_assignment_via_employee_endpoints() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.post(app.url("/companies")).json(&json!({"name": "Acme"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let company: serde_json::Value = res.json().await?;
    let company_id = company["id"].as_i64().unwrap_or_default();
    assert_eq!(company["employees"], json!([]));

    let emily = &app.seeded[3];
    let res = c
        .put(app.url(&format!("/employees/{}", emily.id)))
        .json(&json!({"companyId": company_id}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(app.url(&format!("/companies/{company_id}/employees"))).send().await?;
    let staff: Vec<Employee> = res.json().await?;
    assert_eq!(staff.len(), 1);
    assert_eq!(staff[0].name, "Emily Brown");
    assert_eq!(staff[0].company_id.map(i64::from), Some(company_id));

    let res = c.get(app.url("/companies")).query(&[("pageIndex", "1"), ("pageSize", "10")]).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let companies: serde_json::Value = res.json().await?;
    assert_eq!(companies[0]["employees"][0]["name"], "Emily Brown");
    Ok(())
}
