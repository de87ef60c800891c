use std::process::{Command, Output};

fn run_quad(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_quad"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute quad")
}

fn assert_success(output: &Output) -> String {
    if !output.status.success() {
        panic!(
            "Command failed with status: {:?}\nstderr: {}\nstdout: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr),
            String::from_utf8_lossy(&output.stdout)
        );
    }
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_integrate_exp() {
    let output = run_quad(&[
        "integrate", "--function", "exp", "--left", "0", "--right", "1", "--step", "0.0001",
    ]);
    let stdout = assert_success(&output);

    assert!(stdout.contains("Integral: 1.7182818"), "stdout: {}", stdout);
    assert!(stdout.contains("Exact: 1.718281828459045"));
    assert!(stdout.contains("10000 segments"));
}

#[test]
fn test_integrate_log_outside_domain_fails() {
    let output = run_quad(&[
        "integrate", "--function", "log", "--left", "-1", "--right", "2", "--step", "0.1",
    ]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "stderr: {}", stderr);
}

#[test]
fn test_integrate_log_from_zero_fails() {
    let output = run_quad(&[
        "integrate", "--function", "log", "--left", "0", "--right", "1", "--step", "0.1",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("is not finite"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_log_base_fails() {
    let output = run_quad(&[
        "integrate", "--function", "log", "--base", "1", "--left", "1", "--right", "2",
        "--step", "0.1",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid logarithm base"), "stderr: {}", stderr);
}

#[test]
fn test_optimal_step() {
    let output = run_quad(&[
        "optimal-step", "--left", "0", "--right", "1", "--accuracy", "1e-6",
        "--initial-step", "0.5",
    ]);
    let stdout = assert_success(&output);

    assert!(stdout.contains("Optimal step:"));
    assert!(stdout.contains("Halvings:"));
    assert!(stdout.contains("Actual error:"));
}

#[test]
fn test_optimal_step_gives_up() {
    let output = run_quad(&[
        "optimal-step", "--left", "0", "--right", "1", "--accuracy", "1e-12",
        "--initial-step", "1", "--max-halvings", "2",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("did not converge"), "stderr: {}", stderr);
}

#[test]
fn test_table_defaults() {
    let output = run_quad(&["table"]);
    let stdout = assert_success(&output);

    assert!(stdout.contains("Exact value: 1.718281828459045"));
    for step in ["0.5", "0.1", "0.01", "0.001", "0.0001"] {
        assert!(
            stdout.lines().any(|line| line.starts_with(step)),
            "missing row for step {}",
            step
        );
    }
}

#[test]
fn test_run_session_quiet() {
    let output = run_quad(&[
        "run", "-n", "20", "--seed", "1", "--pace-ms", "1", "--producer-delay-ms", "1", "--quiet",
    ]);
    let stdout = assert_success(&output);

    assert!(stdout.contains("Running producer/consumer session..."));
    assert!(stdout.contains("Session Statistics:"));
    assert!(stdout.contains("Published: 20"));
    assert!(!stdout.contains("Result "));
}

#[test]
fn test_run_session_every_mode() {
    for mode in ["exclusive", "read-write", "channel"] {
        let output = run_quad(&["run", "-n", "10", "--mode", mode, "--pace-ms", "1", "--quiet"]);
        let stdout = assert_success(&output);
        assert!(stdout.contains(&format!("Sync mode: {}", mode)), "stdout: {}", stdout);
    }
}

#[test]
fn test_sequential_prints_every_result() {
    let output = run_quad(&["sequential", "-n", "5", "--seed", "7"]);
    let stdout = assert_success(&output);

    let results = stdout.lines().filter(|l| l.starts_with("Result ")).count();
    assert_eq!(results, 5);
    assert!(stdout.contains("Results: 5"));
    assert!(stdout.contains("Delivery rate: 100.00%"));
}
