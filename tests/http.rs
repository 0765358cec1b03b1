use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PINNED_TODAY: &str = "2025-02-02";

struct TestServer {
    base_url: String,
    child: Child,
    // Keeps the fake provider alive for as long as the server uses it.
    _provider: MockServer,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn forecast_days(high: f64) -> Value {
    let days: Vec<Value> = (2..16)
        .map(|day| {
            json!({
                "date": format!("2025-02-{day:02}"),
                "day": {
                    "maxtemp_f": high,
                    "mintemp_f": high - 18.0,
                    "condition": { "text": "Partly cloudy", "icon": "//cdn.weatherapi.com/weather/64x64/day/116.png" }
                }
            })
        })
        .collect();
    json!({ "forecast": { "forecastday": days } })
}

async fn start_provider() -> MockServer {
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", "Punxsutawney"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_days(34.0)))
        .mount(&provider)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", "Miami"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_days(81.0)))
        .mount(&provider)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", "Atlantis"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 1006, "message": "No matching location found." }
        })))
        .mount(&provider)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", "Nowhere"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "location": { "name": "Nowhere" }
        })))
        .mount(&provider)
        .await;

    provider
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/mode")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let provider = start_provider().await;
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_groundhog_check"))
        .env("PORT", port.to_string())
        .env("WEATHER_API_KEY", "test-key")
        .env("WEATHER_API_BASE", provider.uri())
        .env("APP_TODAY", PINNED_TODAY)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer {
        base_url,
        child,
        _provider: provider,
    }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn submit(client: &Client, server: &TestServer, location: &str) -> reqwest::Response {
    client
        .post(format!("{}/api/location", server.base_url))
        .json(&json!({ "location": location }))
        .send()
        .await
        .unwrap()
}

async fn current_query(client: &Client, server: &TestServer) -> Value {
    client
        .get(format!("{}/api/query", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_mode_uses_pinned_calendar() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let mode: Value = client
        .get(format!("{}/api/mode", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(mode["today"], PINNED_TODAY);
    assert_eq!(mode["mode"], "forecast");
    assert_eq!(mode["window_days"], 14);
    assert_eq!(mode["spring_start"], "2025-03-20");
    assert_eq!(mode["date_range"]["start"], "2025-02-02");
    assert_eq!(mode["date_range"]["end"], "2025-02-16");
    assert_eq!(mode["approaching_spring"], false);
}

#[tokio::test]
async fn http_index_serves_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client.get(&server.base_url).send().await.unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Is the Groundhog Correct?"));
    assert!(body.contains("Using the 14-day forecast until spring starts on 2025-03-20."));
}

#[tokio::test]
async fn http_cold_forecast_agrees_with_groundhog() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = submit(&client, &server, "Punxsutawney").await;
    assert_eq!(response.status(), StatusCode::OK);
    let report: Value = response.json().await.unwrap();

    assert_eq!(report["location"], "Punxsutawney");
    assert_eq!(report["prediction"]["warm_day_count"], 0);
    assert_eq!(report["prediction"]["total_days"], 14);
    assert_eq!(report["prediction"]["derived_outcome"], "more-winter");
    assert_eq!(report["prediction"]["reference_outcome"], "more-winter");
    assert_eq!(report["prediction"]["is_match"], true);
    assert_eq!(report["summary"]["verdict"], "Groundhog is correct!");
    assert_eq!(report["days"].as_array().unwrap().len(), 14);
    assert_eq!(report["chart"]["title"], "Forecast Temperature Data");

    let query = current_query(&client, &server).await;
    assert_eq!(query["status"], "ready");
    assert_eq!(query["location"], "Punxsutawney");
    assert_eq!(query["report"]["location"], "Punxsutawney");
}

#[tokio::test]
async fn http_warm_forecast_contradicts_groundhog() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = submit(&client, &server, "  Miami  ").await;
    assert_eq!(response.status(), StatusCode::OK);
    let report: Value = response.json().await.unwrap();

    assert_eq!(report["location"], "Miami");
    assert_eq!(report["prediction"]["warm_day_count"], 14);
    assert_eq!(report["prediction"]["derived_outcome"], "early-spring");
    assert_eq!(report["prediction"]["is_match"], false);
    assert_eq!(report["summary"]["verdict"], "Groundhog is incorrect!");
    assert_eq!(
        report["days"][0]["condition_icon"],
        "https://cdn.weatherapi.com/weather/64x64/day/116.png"
    );
}

#[tokio::test]
async fn http_blank_location_is_rejected_without_state_change() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = current_query(&client, &server).await;
    let response = submit(&client, &server, "   ").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let after = current_query(&client, &server).await;

    assert_eq!(before["generation"], after["generation"]);
    assert_eq!(before["location"], after["location"]);
}

#[tokio::test]
async fn http_provider_error_is_reported() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = submit(&client, &server, "Atlantis").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let message = response.text().await.unwrap();
    assert_eq!(
        message,
        "Error loading weather data: API error: No matching location found."
    );

    let query = current_query(&client, &server).await;
    assert_eq!(query["status"], "failed");
    assert_eq!(query["location"], "Atlantis");
}

#[tokio::test]
async fn http_malformed_provider_payload_is_reported() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = submit(&client, &server, "Nowhere").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let message = response.text().await.unwrap();
    assert!(message.contains("unexpected response format"), "{message}");
}
