use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use configs::AppConfig;
use server::startup::{build_app, build_state};

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Use an isolated products file per test run
    let temp_id = Uuid::new_v4();
    let mut cfg = AppConfig::default();
    cfg.storage.products_path = std::env::temp_dir()
        .join(format!("catalog_e2e_{}", temp_id))
        .join("products.json")
        .to_string_lossy()
        .into_owned();

    let state = build_state(&cfg).await?;
    let app = build_app(state, &cfg);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_product_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let products = format!("{}/api/products", app.base_url);

    let res = c.post(&products)
        .json(&json!({"product_name": "Rice", "image": "https://img/rice.png", "price": 35000, "quantity": 10}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    let id = created["product"]["id"].as_u64().unwrap();
    assert_eq!(id, 1);

    let res = c.put(format!("{}/{}", products, id)).json(&json!({"quantity": 7})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let fetched = c.get(format!("{}/{}", products, id)).send().await?.json::<Value>().await?;
    assert_eq!(fetched["quantity"], 7);
    assert_eq!(fetched["product_name"], "Rice");
    assert_eq!(fetched["image"], "https://img/rice.png");

    let res = c.delete(format!("{}/{}", products, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.get(format!("{}/{}", products, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let all = c.get(&products).send().await?.json::<Vec<Value>>().await?;
    assert!(all.is_empty());
    Ok(())
}
