//! Integration tests driving `run()` end to end against temporary directories.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use std::fs;
use toolpulse::Host;

/// Test host that captures output to in-memory buffers.
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    const fn new() -> Self {
        Self {
            output_buf: Vec::new(),
            error_buf: Vec::new(),
            exit_code: None,
        }
    }

    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

const SIGNALS: &str = r#"{
    "period": "2025-03",
    "categories": [
        {
            "slug": "coding",
            "name": "Coding Assistants",
            "tools": [
                {
                    "name": "Small",
                    "provider": "Tiny Co",
                    "signals": {
                        "github": {"stars": 100, "stars_30d_ago": 95, "open_issues": 10, "closed_issues": 10},
                        "hn": {"mentions_count": 1},
                        "reddit": {"mentions_count": 0}
                    }
                },
                {
                    "name": "Big",
                    "provider": "Mega Corp",
                    "signals": {
                        "github": {"stars": 5000, "stars_30d_ago": 2500, "open_issues": 10, "closed_issues": 10},
                        "hn": {"mentions_count": 40},
                        "reddit": {"mentions_count": 30}
                    }
                },
                {
                    "name": "Medium",
                    "provider": "Mid Inc",
                    "signals": {
                        "github": {"stars": 800, "stars_30d_ago": 700, "open_issues": 10, "closed_issues": 10},
                        "hn": {"mentions_count": 10},
                        "reddit": {"mentions_count": 5}
                    }
                }
            ]
        }
    ]
}"#;

const PREVIOUS: &str = r#"{
    "period": "2025-02",
    "categories": [
        {
            "slug": "coding",
            "name": "Coding Assistants",
            "items": [
                {"name": "Medium", "rank": 1},
                {"name": "Small", "rank": 2},
                {"name": "Big 2.0", "rank": 3},
                {"name": "Gone", "rank": 4}
            ]
        }
    ]
}"#;

struct Fixture {
    _tmp: tempfile::TempDir,
    root: Utf8PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        fs::write(root.join("signals.json"), SIGNALS).unwrap();
        fs::write(root.join("features.json"), r#"{"Big": {"total": 70}, "Small": {"speed": 60, "quality": 80}}"#).unwrap();
        fs::write(root.join("pricing.json"), r#"{"Small": {"tier": "free"}, "Medium": {"score": 65}}"#).unwrap();

        let fixture = Self { _tmp: tmp, root };
        let host = fixture.run(&["init", "--output", fixture.path("toolpulse.yaml").as_str()]);
        assert_eq!(host.exit_code, None, "{}", host.error_str());
        fixture
    }

    fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    fn out_dir(&self) -> Utf8PathBuf {
        self.path("out")
    }

    fn run(&self, args: &[&str]) -> TestHost {
        let mut host = TestHost::new();
        let args: Vec<String> = core::iter::once("toolpulse").chain(args.iter().copied()).map(String::from).collect();
        toolpulse::run(&mut host, args);
        host
    }

    fn score(&self) -> TestHost {
        self.run(&[
            "score",
            "--signals",
            self.path("signals.json").as_str(),
            "--config",
            self.path("toolpulse.yaml").as_str(),
            "--features",
            self.path("features.json").as_str(),
            "--pricing",
            self.path("pricing.json").as_str(),
            "--output-dir",
            self.out_dir().as_str(),
            "--color",
            "never",
        ])
    }
}

fn read_json(path: &Utf8Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn item<'a>(snapshot: &'a Value, name: &str) -> &'a Value {
    listed_item(snapshot, "items", name)
}

fn listed_item<'a>(snapshot: &'a Value, list_key: &str, name: &str) -> &'a Value {
    snapshot["categories"][0][list_key]
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item["name"] == name)
        .unwrap()
}

#[test]
fn test_score_writes_snapshot() {
    let fixture = Fixture::new();
    let host = fixture.score();

    assert_eq!(host.exit_code, None, "{}", host.error_str());
    assert!(host.output_str().contains("Rankings for 2025-03"), "{}", host.output_str());
    assert!(host.output_str().contains("Snapshot written to"));

    let snapshot = read_json(&fixture.out_dir().join("rankings_2025-03.json"));
    assert_eq!(snapshot["period"], "2025-03");

    let names: Vec<_> = snapshot["categories"][0]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| (item["name"].as_str().unwrap().to_string(), item["rank"].as_u64().unwrap()))
        .collect();
    assert_eq!(names[0], ("Big".to_string(), 1));
    assert_eq!(names.len(), 3);

    assert_eq!(item(&snapshot, "Big")["utility"], 70.0);
    assert_eq!(item(&snapshot, "Small")["utility"], 70.0);
    assert_eq!(item(&snapshot, "Small")["price"], 100.0);
    assert_eq!(item(&snapshot, "Medium")["price"], 65.0);
    assert_eq!(item(&snapshot, "Medium")["utility"], 50.0);
    assert_eq!(item(&snapshot, "Big")["price"], 50.0);

    assert_eq!(snapshot["trend_analysis"]["has_previous_data"], false);
    assert_eq!(item(&snapshot, "Big")["trend"]["status"], "new");
    assert_eq!(item(&snapshot, "Big")["trend"]["previous_rank"], Value::Null);
}

#[test]
fn test_score_is_byte_identical_across_runs() {
    let fixture = Fixture::new();
    let path = fixture.out_dir().join("rankings_2025-03.json");

    assert_eq!(fixture.score().exit_code, None);
    let first = fs::read(&path).unwrap();
    assert_eq!(fixture.score().exit_code, None);
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_score_compares_with_previous_month() {
    let fixture = Fixture::new();
    fs::create_dir_all(fixture.out_dir()).unwrap();
    fs::write(fixture.out_dir().join("rankings_2025-02.json"), PREVIOUS).unwrap();

    let host = fixture.score();
    assert_eq!(host.exit_code, None, "{}", host.error_str());
    assert!(host.output_str().contains("compared with 2025-02"));
    assert!(host.output_str().contains("▲ +2"));

    let snapshot = read_json(&fixture.out_dir().join("rankings_2025-03.json"));
    let analysis = &snapshot["trend_analysis"];
    assert_eq!(analysis["has_previous_data"], true);
    assert_eq!(analysis["previous_period"], "2025-02");

    let big = &item(&snapshot, "Big")["trend"];
    assert_eq!(big["status"], "rising");
    assert_eq!(big["previous_rank"], 3);
    assert_eq!(big["rank_change"], 2);

    assert_eq!(item(&snapshot, "Medium")["trend"]["status"], "falling");

    let gone = &analysis["trends"]["coding"]["Gone"];
    assert_eq!(gone["status"], "disappeared");
    assert_eq!(gone["previous_rank"], 4);
    assert_eq!(gone["rank_change"], Value::Null);
}

#[test]
fn test_score_falls_back_to_example_snapshot() {
    let fixture = Fixture::new();
    fs::create_dir_all(fixture.out_dir()).unwrap();
    fs::write(fixture.out_dir().join("rankings_2025-02_example.json"), PREVIOUS).unwrap();

    assert_eq!(fixture.score().exit_code, None);
    let snapshot = read_json(&fixture.out_dir().join("rankings_2025-03.json"));
    assert_eq!(snapshot["trend_analysis"]["has_previous_data"], true);
}

#[test]
fn test_score_with_missing_config_fails() {
    let fixture = Fixture::new();
    let host = fixture.run(&[
        "score",
        "--signals",
        fixture.path("signals.json").as_str(),
        "--config",
        fixture.path("missing.yaml").as_str(),
    ]);

    assert_eq!(host.exit_code, Some(1));
    assert!(host.error_str().contains("reading configuration file"), "{}", host.error_str());
}

#[test]
fn test_score_with_missing_signals_fails() {
    let fixture = Fixture::new();
    let host = fixture.run(&[
        "score",
        "--signals",
        fixture.path("nope.json").as_str(),
        "--config",
        fixture.path("toolpulse.yaml").as_str(),
    ]);

    assert_eq!(host.exit_code, Some(1));
    assert!(host.error_str().contains("nope.json"), "{}", host.error_str());
}

#[test]
fn test_dry_run_writes_nothing() {
    let fixture = Fixture::new();
    let host = fixture.run(&[
        "score",
        "--signals",
        fixture.path("signals.json").as_str(),
        "--config",
        fixture.path("toolpulse.yaml").as_str(),
        "--output-dir",
        fixture.out_dir().as_str(),
        "--dry-run",
    ]);

    assert_eq!(host.exit_code, None, "{}", host.error_str());
    assert!(!fixture.out_dir().join("rankings_2025-03.json").exists());
}

#[test]
fn test_trends_annotates_llm_snapshot_in_place() {
    let fixture = Fixture::new();
    let current = r#"{
        "period": "2025-03",
        "generated_at": "2025-03-31",
        "categories": [
            {
                "slug": "coding",
                "name": "Coding Assistants",
                "top3": [
                    {"rank": 1, "name": "Big", "medal": "gold"},
                    {"rank": 2, "name": "Small"},
                    {"rank": 3, "name": "Newcomer"}
                ]
            }
        ]
    }"#;
    fs::write(fixture.path("rankings_2025-03.json"), current).unwrap();
    fs::write(fixture.path("rankings_2025-02.json"), PREVIOUS).unwrap();

    let host = fixture.run(&["trends", "--snapshot", fixture.path("rankings_2025-03.json").as_str(), "--color", "never"]);
    assert_eq!(host.exit_code, None, "{}", host.error_str());

    let snapshot = read_json(&fixture.path("rankings_2025-03.json"));
    assert_eq!(snapshot["generated_at"], "2025-03-31");

    let category = &snapshot["categories"][0];
    assert!(category.get("items").is_none(), "{category}");
    assert_eq!(category["top3"].as_array().unwrap().len(), 3);

    let big = listed_item(&snapshot, "top3", "Big");
    assert_eq!(big["medal"], "gold");
    assert_eq!(big["trend"]["status"], "rising");
    for field in ["final_score", "buzz", "sentiment", "utility", "price", "provider"] {
        assert!(big.get(field).is_none(), "{field} was added: {big}");
    }

    assert_eq!(listed_item(&snapshot, "top3", "Small")["trend"]["status"], "stable");
    assert_eq!(listed_item(&snapshot, "top3", "Newcomer")["trend"]["status"], "new");
    assert_eq!(snapshot["trend_analysis"]["trends"]["coding"]["Medium"]["status"], "disappeared");
}

#[test]
fn test_trends_only_adds_trend_annotations() {
    let fixture = Fixture::new();
    let original = r#"{"period":"2025-03","categories":[{"slug":"c","top3":[{"rank":1,"name":"Big","short_reason":"x"}]}]}"#;
    fs::write(fixture.path("rankings_2025-03.json"), original).unwrap();

    let host = fixture.run(&["trends", "--snapshot", fixture.path("rankings_2025-03.json").as_str(), "--color", "never"]);
    assert_eq!(host.exit_code, None, "{}", host.error_str());

    let mut rewritten = read_json(&fixture.path("rankings_2025-03.json"));
    let trend = rewritten["categories"][0]["top3"][0].as_object_mut().unwrap().remove("trend");
    assert_eq!(trend.unwrap()["status"], "new");
    let _ = rewritten.as_object_mut().unwrap().remove("trend_analysis").unwrap();

    let original: Value = serde_json::from_str(original).unwrap();
    assert_eq!(rewritten, original);
}

#[test]
fn test_score_tolerates_malformed_signals() {
    let fixture = Fixture::new();
    let signals = r#"{
        "period": "2025-03",
        "categories": [
            {
                "slug": "coding",
                "name": "Coding Assistants",
                "tools": [
                    {"name": "Broken", "signals": {"github": {"stars": null, "open_issues": "many"}, "hn": {"mentions_count": -1}}},
                    {"name": "Fine", "signals": {"github": {"stars": 10}}}
                ]
            }
        ]
    }"#;
    fs::write(fixture.path("signals.json"), signals).unwrap();

    let host = fixture.score();
    assert_eq!(host.exit_code, None, "{}", host.error_str());

    let snapshot = read_json(&fixture.out_dir().join("rankings_2025-03.json"));
    assert_eq!(item(&snapshot, "Fine")["rank"], 1);
    assert_eq!(item(&snapshot, "Broken")["rank"], 2);
}

#[test]
fn test_validate_reports_snapshot_issues() {
    let fixture = Fixture::new();
    fs::write(
        fixture.path("short.json"),
        r#"{"period": "2025-03", "categories": [{"slug": "coding", "items": [{"name": "A", "rank": 1}]}]}"#,
    )
    .unwrap();

    let host = fixture.run(&[
        "validate",
        "--config",
        fixture.path("toolpulse.yaml").as_str(),
        "--snapshot",
        fixture.path("short.json").as_str(),
    ]);

    assert_eq!(host.exit_code, None, "{}", host.error_str());
    let output = host.output_str();
    assert!(output.contains("is valid"), "{output}");
    assert!(output.contains("1 issue(s)"), "{output}");
}

#[test]
fn test_validate_rejects_negative_weight() {
    let fixture = Fixture::new();
    fs::write(fixture.path("bad.yaml"), "weights:\n  buzz: -0.3\n  sentiment: 0.25\n  utility: 0.25\n  price: 0.2\n").unwrap();

    let host = fixture.run(&["validate", "--config", fixture.path("bad.yaml").as_str()]);
    assert_eq!(host.exit_code, Some(1));
    assert!(host.error_str().contains("buzz"), "{}", host.error_str());
}

#[test]
fn test_init_refuses_to_overwrite() {
    let fixture = Fixture::new();
    let host = fixture.run(&["init", "--output", fixture.path("toolpulse.yaml").as_str()]);
    assert_eq!(host.exit_code, Some(1));
    assert!(host.error_str().contains("already exists"));

    let host = fixture.run(&["init", "--output", fixture.path("toolpulse.yaml").as_str(), "--force"]);
    assert_eq!(host.exit_code, None);
}

#[test]
fn test_help_goes_to_output() {
    let fixture = Fixture::new();
    let host = fixture.run(&["--help"]);
    assert_eq!(host.exit_code, Some(0));
    assert!(host.output_str().contains("score"));
}
