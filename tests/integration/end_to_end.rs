// tests/integration/end_to_end.rs
use integ_assert::{
    config::{Config, ConfigBuilder},
    error::{AppError, Result},
    run,
    runner::Verification,
    synth_options::SynthOptions,
};
use serde_json::json;
use std::collections::BTreeMap;

#[path = "../common/mod.rs"]
mod common;
use common::{TestDir, bucket_template, topic_template};

fn sh_config(dir: &TestDir) -> Config {
    ConfigBuilder::default()
        .directory(dir.path())
        .extension("sh")
        .synth_command("sh")
        .build()
        .expect("valid config")
}

fn run_to_string(config: &Config) -> (Result<Verification>, String) {
    let mut out = Vec::new();
    let result = run(config, &mut out);
    (result, String::from_utf8(out).expect("utf-8 output"))
}

#[test]
fn end_to_end_all_tests_match() {
    let dir = TestDir::new();
    dir.app("bucket", &bucket_template("a"))
        .expected("bucket", &bucket_template("a"));
    dir.app("topic", &topic_template())
        .expected("topic", &topic_template());

    let (result, out) = run_to_string(&sh_config(&dir));
    let verification = result.expect("run succeeds");

    assert!(verification.is_success());
    let names: Vec<_> = verification.outcomes.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["integ.bucket.sh", "integ.topic.sh"]);
    assert_eq!(out.matches("... OK (").count(), 2);
}

#[test]
fn end_to_end_reports_changes() {
    let dir = TestDir::new();
    dir.app("bucket", &bucket_template("new-name"))
        .expected("bucket", &bucket_template("old-name"));

    let (result, out) = run_to_string(&sh_config(&dir));
    let verification = result.expect("run succeeds");

    assert_eq!(verification.failures, ["integ.bucket.sh"]);
    assert!(out.contains("CHANGED ("));
    assert!(out.contains(" ├─ [-] \"old-name\""));
    assert!(out.contains(" └─ [+] \"new-name\""));
}

#[test]
fn end_to_end_multi_stack_apps() {
    let dir = TestDir::new();
    let first = bucket_template("a");
    let second = topic_template();
    dir.multi_stack_app("stacks", &[("First", &first), ("Second", &second)])
        .expected("stacks", &json!({ "First": first, "Second": second }));

    let (result, _) = run_to_string(&sh_config(&dir));
    assert!(result.expect("run succeeds").is_success());
}

#[test]
fn end_to_end_missing_expected() {
    let dir = TestDir::new();
    dir.app("alpha", &topic_template());
    dir.app("beta", &topic_template()).expected("beta", &topic_template());

    let (result, out) = run_to_string(&sh_config(&dir));
    match result {
        Err(AppError::MissingExpected { path, record_command }) => {
            assert_eq!(path, dir.path().join("integ.alpha.expected.json"));
            assert_eq!(record_command, "npm run integ");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!out.contains("integ.beta.sh"));
}

#[test]
fn end_to_end_synth_options_reach_the_app() {
    let dir = TestDir::new();
    dir.write_file(
        "integ.env.sh",
        "printf '{\"Description\": \"%s\"}' \"$STAGE\" > \"$CDK_OUTDIR/Stack.template.json\"\n",
    );
    dir.expected("env", &json!({ "Description": "ci" }));

    let mut config = sh_config(&dir);
    config.synth_options = SynthOptions {
        context: BTreeMap::new(),
        env: BTreeMap::from([("STAGE".to_string(), "ci".to_string())]),
    };

    let (result, _) = run_to_string(&config);
    assert!(result.expect("run succeeds").is_success());
}

#[test]
fn end_to_end_synth_failure_is_fatal() {
    let dir = TestDir::new();
    dir.failing_app("broken", "TypeError: boom")
        .expected("broken", &topic_template());

    let (result, _) = run_to_string(&sh_config(&dir));
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Synthesis of integ.broken.sh failed"));
    assert!(err.to_string().contains("TypeError: boom"));
}
