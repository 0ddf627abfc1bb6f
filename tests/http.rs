use chrono::{Duration, Local};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration as StdDuration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct HabitStat {
    key: String,
    rate: u32,
    streak: u32,
    done_today: bool,
}

#[derive(Debug, Deserialize)]
struct HealthStat {
    key: String,
    rate: u32,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    habits: Vec<HabitStat>,
    health: Vec<HealthStat>,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    key: String,
    min: f64,
    max: f64,
    avg: f64,
}

#[derive(Debug, Deserialize)]
struct LoadResponse {
    keys: usize,
    entries: usize,
}

#[derive(Debug, Deserialize)]
struct GroupEntry {
    date: String,
    value: Option<String>,
}

type Groups = BTreeMap<String, Vec<GroupEntry>>;

struct TestServer {
    base_url: String,
    child: Child,
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
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

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

fn unique_seed_path(name: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "habit_dashboard_{name}_{}_{}.csv",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + StdDuration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/stats")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(StdDuration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_habit_dashboard"))
        .env("PORT", port.to_string())
        .env("HABITS_CSV_PATH", unique_seed_path("habits"))
        .env("HEALTH_CSV_PATH", unique_seed_path("health"))
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
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

fn day(offset: i64) -> String {
    (Local::now().date_naive() - Duration::days(offset)).to_string()
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

async fn load_csv(server: &TestServer, client: &Client, kind: &str, text: &str) -> LoadResponse {
    let response = client
        .post(format!("{}/api/load", server.base_url))
        .json(&serde_json::json!({ "kind": kind, "text": text }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_habit_stats_report_rates_and_streaks() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let csv = format!(
        "date,habit\n\
         {today},Meditate\n\
         {yesterday},Meditate\n\
         {two_ago},Meditate\n\
         {three_ago},\"Yoga, Stretching or Core\"\n",
        today = day(0),
        yesterday = day(1),
        two_ago = day(2),
        three_ago = day(3),
    );
    let loaded = load_csv(&server, &client, "habit", &csv).await;
    assert_eq!(loaded.keys, 2);
    assert_eq!(loaded.entries, 4);

    let stats: StatsResponse = client
        .get(format!("{}/api/stats", server.base_url))
        .query(&[("start", day(6))])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let meditate = stats.habits.iter().find(|h| h.key == "Meditate").unwrap();
    assert_eq!(meditate.rate, 43);
    assert_eq!(meditate.streak, 3);
    assert!(meditate.done_today);

    let yoga = stats
        .habits
        .iter()
        .find(|h| h.key == "Yoga, Stretching or Core")
        .unwrap();
    assert_eq!(yoga.rate, 14);
    assert_eq!(yoga.streak, 0);
    assert!(!yoga.done_today);

    let streak: serde_json::Value = client
        .get(format!("{}/api/streak", server.base_url))
        .query(&[("kind", "habit"), ("key", "Meditate")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(streak["streak"], 3);
}

#[tokio::test]
async fn http_health_summary_excludes_zero_and_garbage() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let csv = format!(
        "date,log,value\n\
         {four_ago},Active Calories,not-a-number\n\
         {three_ago},Active Calories,0\n\
         {two_ago},Active Calories,1162.866205242003\n\
         {yesterday},Active Calories,743.162\n\
         {today},Active Calories,597.1159999999998\n",
        four_ago = day(4),
        three_ago = day(3),
        two_ago = day(2),
        yesterday = day(1),
        today = day(0),
    );
    let loaded = load_csv(&server, &client, "health", &csv).await;
    assert_eq!(loaded.keys, 1);
    assert_eq!(loaded.entries, 5);

    let start = day(6);
    let summary: SummaryResponse = client
        .get(format!("{}/api/summary", server.base_url))
        .query(&[("key", "Active Calories"), ("start", start.as_str())])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(summary.key, "Active Calories");
    assert_eq!(round3(summary.min), 597.116);
    assert_eq!(round3(summary.max), 1162.866);
    assert_eq!(round3(summary.avg), 834.381);

    // the zero and garbage entries still count for presence-based views
    let groups: Groups = client
        .get(format!("{}/api/groups", server.base_url))
        .query(&[("kind", "health")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let entries = &groups["Active Calories"];
    assert_eq!(entries.len(), 5);
    assert!(entries.iter().any(|e| e.value.as_deref() == Some("0")));
    assert!(entries.iter().any(|e| e.date == day(0)));

    let stats: StatsResponse = client
        .get(format!("{}/api/stats", server.base_url))
        .query(&[("start", day(6))])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let calories = stats
        .health
        .iter()
        .find(|h| h.key == "Active Calories")
        .unwrap();
    assert_eq!(calories.rate, 71);
}

#[tokio::test]
async fn http_load_replaces_previous_dataset() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let first = format!("date,habit\n{},Old Habit\n", day(0));
    load_csv(&server, &client, "habit", &first).await;

    let second = format!("date,habit\n{},New Habit\n", day(0));
    load_csv(&server, &client, "habit", &second).await;

    let groups: Groups = client
        .get(format!("{}/api/groups", server.base_url))
        .query(&[("kind", "habit")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(groups.contains_key("New Habit"));
    assert!(!groups.contains_key("Old Habit"));
}

#[tokio::test]
async fn http_rejects_invalid_start_and_unknown_key() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let csv = format!("date,habit\n{},Meditate\n", day(0));
    load_csv(&server, &client, "habit", &csv).await;

    let bad_start = client
        .get(format!("{}/api/rate", server.base_url))
        .query(&[("kind", "habit"), ("key", "Meditate"), ("start", "soon")])
        .send()
        .await
        .unwrap();
    assert_eq!(bad_start.status(), reqwest::StatusCode::BAD_REQUEST);

    let unknown_key = client
        .get(format!("{}/api/streak", server.base_url))
        .query(&[("kind", "habit"), ("key", "No Such Habit")])
        .send()
        .await
        .unwrap();
    assert_eq!(unknown_key.status(), reqwest::StatusCode::NOT_FOUND);

    // degenerate but well-formed ranges compute to an explicit zero
    let future = day(-5);
    let future_start: serde_json::Value = client
        .get(format!("{}/api/rate", server.base_url))
        .query(&[("kind", "habit"), ("key", "Meditate"), ("start", future.as_str())])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(future_start["rate"], 0);
}
