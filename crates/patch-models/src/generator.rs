//! Growth process shared by the three models

use crate::attachment::{Attachment, GlobalMechanism};
use patch_core::{
    Error, Graph, GraphGenerator, Group, GroupGraph, ModelName, ModelParams, NodeId, Result,
};
use rand::distributions::{Distribution, WeightedIndex};
use rand::{thread_rng, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Reference implementation of [`GraphGenerator`] for ERPATCH, TCH and PATCH
///
/// Nodes arrive one at a time. Each new node is a minority node with
/// probability `minority_fraction` and links to `min(edges_per_node,
/// existing)` distinct earlier nodes. The first link always uses the model's
/// global mechanism; every further link closes a triangle with probability
/// `tc`, picking among the neighbours of the targets chosen so far.
///
/// The generator is stateless: the randomness of a call is fully determined
/// by `params.seed`, or drawn from the thread RNG when no seed is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchGenerator;

impl PatchGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl GraphGenerator for PatchGenerator {
    fn generate(&self, model: ModelName, params: &ModelParams) -> Result<Graph> {
        params.validate()?;
        if model == ModelName::ErPatch && !params.tc_uniform {
            return Err(Error::InvalidParameter(
                "ERPATCH requires uniform triadic closure".to_string(),
            ));
        }

        let seed = params.seed.unwrap_or_else(|| thread_rng().gen());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mechanism = GlobalMechanism::from(model);

        let mut graph = Graph::new(Vec::with_capacity(params.node_count));
        for _ in 0..params.node_count {
            let group = if rng.gen_bool(params.minority_fraction) {
                Group::Minority
            } else {
                Group::Majority
            };
            let targets = {
                let attachment = Attachment::new(&graph, mechanism, params, group);
                choose_targets(&mut rng, &graph, &attachment, params)
            };
            let node = graph.add_node(group);
            for target in targets {
                graph.add_edge(node, target)?;
            }
        }

        debug!(
            %model,
            seed,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "generated graph"
        );
        Ok(graph)
    }
}

fn choose_targets<R: Rng>(
    rng: &mut R,
    graph: &Graph,
    attachment: &Attachment<'_>,
    params: &ModelParams,
) -> Vec<NodeId> {
    let existing = graph.node_count();
    let wanted = params.edges_per_node.min(existing);
    let mut targets: Vec<NodeId> = Vec::with_capacity(wanted);

    while targets.len() < wanted {
        let closing = if !targets.is_empty() && rng.gen_bool(params.tc) {
            let candidates = closure_candidates(graph, &targets);
            pick(rng, attachment, &candidates, !params.tc_uniform)
        } else {
            None
        };

        let target = match closing {
            Some(target) => target,
            None => {
                let candidates: Vec<NodeId> = (0..existing)
                    .filter(|node| !targets.contains(node))
                    .collect();
                match pick(rng, attachment, &candidates, true) {
                    Some(target) => target,
                    None => break,
                }
            }
        };
        targets.push(target);
    }
    targets
}

/// Neighbours of the chosen targets that are not targets themselves, sorted
fn closure_candidates(graph: &Graph, targets: &[NodeId]) -> Vec<NodeId> {
    let mut candidates: Vec<NodeId> = targets
        .iter()
        .flat_map(|&target| graph.neighbors(target).iter().copied())
        .filter(|node| !targets.contains(node))
        .collect();
    candidates.sort_unstable();
    candidates.dedup();
    candidates
}

fn pick<R: Rng>(
    rng: &mut R,
    attachment: &Attachment<'_>,
    candidates: &[NodeId],
    weighted: bool,
) -> Option<NodeId> {
    if candidates.is_empty() {
        return None;
    }
    if weighted && !attachment.is_uniform() {
        let weights = candidates.iter().map(|&node| attachment.weight(node));
        // all-zero weights (h = 0 or 1 against a single-group pool) fall back to uniform
        if let Ok(dist) = WeightedIndex::new(weights) {
            return Some(candidates[dist.sample(rng)]);
        }
    }
    Some(candidates[rng.gen_range(0..candidates.len())])
}
