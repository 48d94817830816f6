/// Benchmark runner for namespace resolution.
///
/// Compares first access (classify + create/load) against cached access.

extern crate lazyns;

use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lazyns::resolver::{
    is_unit_name, register_with, NamespaceRegistry, NodeRef, ResolutionNode, Result, Scope,
    Strategy, SymbolKind, Target, Unit,
};

/// Units are their own name; nothing touches the filesystem.
struct InMemory;

impl Strategy for InMemory {
    fn classify(&self, _node: &ResolutionNode, name: &str) -> Result<SymbolKind> {
        Ok(if is_unit_name(name) {
            SymbolKind::Unit
        } else {
            SymbolKind::Namespace
        })
    }

    fn load_unit(&self, _node: &ResolutionNode, name: &str) -> Result<Unit> {
        Ok(Rc::new(name.to_string()))
    }
}

fn fresh_root() -> NodeRef {
    let registry = Arc::new(NamespaceRegistry::new());
    let roots = register_with(
        &registry,
        "bench",
        Arc::new(InMemory),
        Target::Table(Rc::new(Scope::new())),
    )
    .expect("register bench namespace");
    roots[0].clone()
}

fn paths(width: usize, depth: usize) -> Vec<String> {
    let mut paths = Vec::with_capacity(width);
    for i in 0..width {
        let mut segments: Vec<String> = (0..depth).map(|d| format!("pkg{}_{}", d, i % 7)).collect();
        segments.push(format!("Unit{}", i));
        paths.push(segments.join("."));
    }
    paths
}

/// Resolve every path once on a fresh tree.
fn run_cold(paths: &[String], iterations: u32) -> Duration {
    let start = Instant::now();
    for _ in 0..iterations {
        let root = fresh_root();
        for path in paths {
            let _ = root.resolve_path(path);
        }
    }
    start.elapsed()
}

/// Resolve every path on a tree that has already resolved them.
fn run_warm(paths: &[String], iterations: u32) -> Duration {
    let root = fresh_root();
    for path in paths {
        let _ = root.resolve_path(path);
    }
    let start = Instant::now();
    for _ in 0..iterations {
        for path in paths {
            let _ = root.resolve_path(path);
        }
    }
    start.elapsed()
}

fn main() {
    println!("=======================================================");
    println!("  lazyns - Resolution Benchmarks");
    println!("  First access vs cached access");
    println!("=======================================================\n");

    let benchmarks: Vec<(&str, usize, usize, u32)> = vec![
        ("Flat (100 units)", 100, 0, 200),
        ("Shallow (100 units, depth 2)", 100, 2, 200),
        ("Deep (100 units, depth 8)", 100, 8, 100),
        ("Wide (1000 units, depth 3)", 1000, 3, 20),
    ];

    println!("{:<32} {:>14} {:>14} {:>10}", "Benchmark", "Cold", "Warm", "Ratio");
    println!("{}", "-".repeat(72));

    for (name, width, depth, iterations) in &benchmarks {
        let paths = paths(*width, *depth);
        let cold = run_cold(&paths, *iterations);
        let warm = run_warm(&paths, *iterations);
        let ratio = cold.as_secs_f64() / warm.as_secs_f64().max(f64::EPSILON);
        println!(
            "{:<32} {:>12.2}ms {:>12.2}ms {:>9.1}x",
            name,
            cold.as_secs_f64() * 1000.0,
            warm.as_secs_f64() * 1000.0,
            ratio
        );
    }
}
