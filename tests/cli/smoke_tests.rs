use assert_cmd::Command;
use predicates::prelude::*;

#[path = "../common/mod.rs"]
mod common;
use common::{TestDir, bucket_template, topic_template};

fn integ_assert(dir: &TestDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_integ-assert"));
    cmd.arg("--directory")
        .arg(dir.path())
        .args(["--extension", "sh", "--synth-command", "sh"])
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn shows_help() {
    Command::new(env!("CARGO_BIN_EXE_integ-assert"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("integ-assert"))
        .stdout(predicate::str::contains("--synth-options"));
}

#[test]
fn passes_when_every_stack_matches() {
    let dir = TestDir::new();
    dir.app("bucket", &bucket_template("a"))
        .expected("bucket", &bucket_template("a"));

    integ_assert(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Verifying integ.bucket.sh against "))
        .stdout(predicate::str::contains("integ.bucket.expected.json ... OK ("))
        .stdout(predicate::str::contains("seconds: synth="));
}

#[test]
fn fails_and_lists_changed_stacks() {
    let dir = TestDir::new();
    dir.app("bucket", &bucket_template("b"))
        .expected("bucket", &bucket_template("a"));
    dir.app("topic", &topic_template())
        .expected("topic", &topic_template());

    integ_assert(&dir)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("integ.bucket.expected.json ... CHANGED ("))
        .stdout(predicate::str::contains("[~] AWS::S3::Bucket Bucket"))
        .stdout(predicate::str::contains("integ.topic.expected.json ... OK ("))
        .stderr(predicate::str::contains(
            "Some stacks have changed. To verify that they still deploy successfully, run: 'npm run integ integ.bucket.sh'",
        ));
}

#[test]
fn record_command_appears_in_the_verdict() {
    let dir = TestDir::new();
    dir.app("bucket", &bucket_template("b"))
        .expected("bucket", &bucket_template("a"));

    integ_assert(&dir)
        .args(["--record-command", "yarn integ"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("run: 'yarn integ integ.bucket.sh'"));
}

#[test]
fn missing_expected_file_is_an_error() {
    let dir = TestDir::new();
    dir.app("bucket", &bucket_template("a"));

    integ_assert(&dir)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No such file: "))
        .stderr(predicate::str::contains("integ.bucket.expected.json. Run 'npm run integ'."));
}

#[test]
fn positional_test_names_do_not_select_tests() {
    let dir = TestDir::new();
    dir.app("bucket", &bucket_template("a"))
        .expected("bucket", &bucket_template("a"));
    dir.app("topic", &topic_template())
        .expected("topic", &topic_template());

    integ_assert(&dir)
        .arg("integ.bucket.sh")
        .assert()
        .success()
        .stdout(predicate::str::contains("Verifying integ.bucket.sh"))
        .stdout(predicate::str::contains("Verifying integ.topic.sh"));
}

#[test]
fn failing_app_reports_its_stderr() {
    let dir = TestDir::new();
    dir.failing_app("broken", "cannot find module")
        .expected("broken", &topic_template());

    integ_assert(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Synthesis of integ.broken.sh failed"))
        .stderr(predicate::str::contains("cannot find module"));
}

#[test]
fn synth_options_file_sets_the_app_environment() {
    let dir = TestDir::new();
    dir.write_file(
        "integ.region.sh",
        "printf '{\"Description\": \"%s\"}' \"$CDK_INTEG_REGION\" > \"$CDK_OUTDIR/Stack.template.json\"\n",
    );
    dir.expected("region", &serde_json::json!({ "Description": "eu-west-9" }));
    let options = dir.write_file("options.yaml", "env:\n  CDK_INTEG_REGION: eu-west-9\n");

    integ_assert(&dir)
        .arg("--synth-options")
        .arg(&options)
        .assert()
        .success();
}

#[test]
fn default_synth_options_use_the_test_region() {
    let dir = TestDir::new();
    dir.write_file(
        "integ.region.sh",
        "printf '{\"Description\": \"%s\"}' \"$CDK_INTEG_REGION\" > \"$CDK_OUTDIR/Stack.template.json\"\n",
    );
    dir.expected("region", &serde_json::json!({ "Description": "test-region" }));

    integ_assert(&dir).assert().success();
}

#[test]
fn rejects_invalid_extension() {
    Command::new(env!("CARGO_BIN_EXE_integ-assert"))
        .args(["--extension", "j*s"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--extension"));
}
