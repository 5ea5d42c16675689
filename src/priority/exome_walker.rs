//! ExomeWalker prioritizer: random-walk-with-restart on a protein-protein
//! interaction network, seeded by a caller-supplied gene list. Per-node
//! work is embarrassingly parallel, fanned out with `rayon::par_iter()`.

use std::collections::HashMap;

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::model::{Gene, PriorityType};

use super::{ensure_all_scored, Prioritizer};

/// Restart probability of the random walk; fraction of mass returned to the
/// seed set at every step.
const RESTART_PROBABILITY: f64 = 0.15;

/// Iterations to run before treating the visit-probability vector as
/// converged; the RWR update is a contraction so a fixed small count is
/// sufficient for the network sizes this crate is exercised against.
const ITERATIONS: usize = 20;

/// A protein-protein interaction network as a symmetric adjacency map
/// keyed by gene symbol.
#[derive(Debug, Clone, Default)]
pub struct Network {
    neighbors: IndexMap<String, Vec<String>>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an undirected edge between two gene symbols.
    pub fn with_edge(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        self.neighbors.entry(a.clone()).or_default().push(b.clone());
        self.neighbors.entry(b).or_default().push(a);
        self
    }

    fn nodes(&self) -> impl Iterator<Item = &str> {
        self.neighbors.keys().map(String::as_str)
    }

    fn degree(&self, node: &str) -> usize {
        self.neighbors.get(node).map(Vec::len).unwrap_or(0)
    }

    fn neighbors_of(&self, node: &str) -> &[String] {
        self.neighbors
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Random-walk-with-restart over `network`, seeded by `seed_genes`; scores
/// the remaining nodes by their scaled visit probability in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct ExomeWalkerPrioritizer {
    network: Network,
    seed_genes: Vec<String>,
}

impl ExomeWalkerPrioritizer {
    pub fn new(network: Network, seed_genes: Vec<String>) -> Self {
        Self {
            network,
            seed_genes,
        }
    }

    fn run_walk(&self) -> HashMap<String, f64> {
        let nodes: Vec<&str> = self.network.nodes().collect();
        if nodes.is_empty() {
            return HashMap::new();
        }

        let seeds: Vec<&str> = self
            .seed_genes
            .iter()
            .map(String::as_str)
            .filter(|g| self.network.neighbors.contains_key(*g))
            .collect();
        if seeds.is_empty() {
            return nodes.iter().map(|n| (n.to_string(), 0.0)).collect();
        }

        let restart_mass = 1.0 / seeds.len() as f64;
        let restart: HashMap<&str, f64> = nodes
            .iter()
            .map(|&n| (n, if seeds.contains(&n) { restart_mass } else { 0.0 }))
            .collect();

        let mut probability = restart.clone();
        for _ in 0..ITERATIONS {
            let next: HashMap<&str, f64> = nodes
                .par_iter()
                .map(|&node| {
                    let walked: f64 = self
                        .network
                        .neighbors_of(node)
                        .iter()
                        .map(|neighbor| {
                            let degree = self.network.degree(neighbor).max(1) as f64;
                            probability.get(neighbor.as_str()).copied().unwrap_or(0.0) / degree
                        })
                        .sum();
                    let value = RESTART_PROBABILITY * restart[node]
                        + (1.0 - RESTART_PROBABILITY) * walked;
                    (node, value)
                })
                .collect();
            probability = next;
        }

        let max = probability
            .values()
            .copied()
            .fold(0.0_f64, f64::max)
            .max(f64::MIN_POSITIVE);
        probability
            .into_iter()
            .map(|(k, v)| (k.to_string(), (v / max).clamp(0.0, 1.0)))
            .collect()
    }
}

impl Prioritizer for ExomeWalkerPrioritizer {
    fn priority_type(&self) -> PriorityType {
        PriorityType::ExomeWalker
    }

    fn prioritize(&self, genes: &mut [Gene]) {
        let scores = self.run_walk();
        ensure_all_scored(genes, self.priority_type(), 0.0, |gene| {
            scores.get(&gene.gene_symbol).copied()
        });
    }
}
