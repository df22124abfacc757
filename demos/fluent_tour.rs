//! Tour of the fluent assertion API: chains, failure collection,
//! structural equivalence, panic capture, and async deadlines.

use std::time::Duration;

use serde::Serialize;
use serde_json::json;
use voluble::{expect, structural, Scope};

#[derive(Serialize)]
struct Deployment {
    service: String,
    replicas: u32,
    regions: Vec<String>,
}

struct HealthCheck {
    path: String,
    interval_seconds: u32,
}

structural! {
    HealthCheck { path, interval_seconds }
}

fn divide(a: u32, b: u32) -> u32 {
    a / b
}

async fn fetch_status() -> &'static str {
    tokio::time::sleep(Duration::from_millis(10)).await;
    "healthy"
}

#[tokio::main]
async fn main() {
    // Example 1: chains read as sentences
    println!("=== Chained assertions ===");
    let log_line = "deployed api-gateway to 3 regions";
    expect(log_line)
        .to_start_with("deployed")
        .and()
        .to_contain("3 regions");

    let ports = vec![8080, 8443, 9090];
    expect(&ports)
        .to_contain(&8443)
        .and()
        .to_have_count(3)
        .and()
        .to_be_in_ascending_order();
    println!("All chained assertions passed");

    // Example 2: collected failures with names and reasons
    println!("\n=== Collected failures ===");
    let scope = Scope::open();
    let replicas = 2;
    voluble::expect!(replicas).to_be(3);
    expect("eu-west-1")
        .named_as("primary region")
        .because("latency budgets assume US traffic")
        .to_start_with("us-");
    if let Err(report) = scope.try_close() {
        println!("{} assertion(s) failed in the scope:", report.len());
        for failure in report.failures() {
            println!("  - {}", failure);
        }
    }

    // Example 3: structural equivalence
    println!("\n=== Structural equivalence ===");
    let deployment = Deployment {
        service: "api-gateway".to_string(),
        replicas: 3,
        regions: vec!["us-east-1".to_string(), "eu-west-1".to_string()],
    };
    // Extra actual fields (replicas) are ignored by subset matching.
    expect(deployment).as_json().to_be_equivalent_to(&json!({
        "service": "api-gateway",
        "regions": ["us-east-1", "eu-west-1"],
    }));

    let check = HealthCheck {
        path: "/healthz".to_string(),
        interval_seconds: 30,
    };
    expect(&check).to_be_equivalent_to(&json!({
        "path": "/healthz",
        "interval_seconds": 30,
    }));
    println!("Deployment and health check match their expected shapes");

    // Example 4: panic capture
    println!("\n=== Panic capture ===");
    // The hook would print a backtrace for the panic we are about to catch.
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(|_| {}));
    expect(|| divide(10, 0)).to_panic_with("divide by zero");
    expect(|| divide(10, 2)).not_to_panic();
    std::panic::set_hook(hook);
    println!("Panic behavior is as declared");

    // Example 5: async deadlines
    println!("\n=== Async deadlines ===");
    expect(fetch_status())
        .named_as("status fetch")
        .to_complete_within(Duration::from_millis(250))
        .await;
    println!("The status fetch beat its deadline");
}
