//! Draw-order strategies.
//!
//! A path optimizer reorders a frame's draw list to cut beam travel or to
//! impose a visual order. Strategies are pure: same entries in, same entries
//! out, only the order changes.

use std::cmp::Ordering;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::renderer::DrawInfo;

pub trait PathOptimizer {
    fn order(&self, draw_list: Vec<DrawInfo>) -> Vec<DrawInfo>;
}

/// Keep the gathered order.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl PathOptimizer for Identity {
    fn order(&self, draw_list: Vec<DrawInfo>) -> Vec<DrawInfo> {
        draw_list
    }
}

/// Stable sort by the first anchor's y. Entries without an anchor keep
/// their relative position.
#[derive(Debug, Default, Clone, Copy)]
pub struct TopToBottom;

impl PathOptimizer for TopToBottom {
    fn order(&self, mut draw_list: Vec<DrawInfo>) -> Vec<DrawInfo> {
        draw_list.sort_by(|a, b| compare_anchor(a, b, |p| p.y));
        draw_list
    }
}

/// Stable sort by the first anchor's x. Entries without an anchor keep
/// their relative position.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeftToRight;

impl PathOptimizer for LeftToRight {
    fn order(&self, mut draw_list: Vec<DrawInfo>) -> Vec<DrawInfo> {
        draw_list.sort_by(|a, b| compare_anchor(a, b, |p| p.x));
        draw_list
    }
}

fn compare_anchor(a: &DrawInfo, b: &DrawInfo, key: impl Fn(Vec2) -> f32) -> Ordering {
    match (a.first, b.first) {
        (Some(a), Some(b)) => key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

/// Greedy nearest-neighbor tour: repeatedly pick the remaining entry whose
/// first anchor is closest to the cursor, starting from the origin. Not an
/// optimal tour; O(n²) and free of dependency ordering.
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestNeighbor;

impl PathOptimizer for NearestNeighbor {
    fn order(&self, mut draw_list: Vec<DrawInfo>) -> Vec<DrawInfo> {
        let mut ordered = Vec::with_capacity(draw_list.len());
        let mut cursor = Vec2::ZERO;

        while !draw_list.is_empty() {
            // Anchorless entries are only picked once no anchored entry
            // remains.
            let next = draw_list
                .iter()
                .enumerate()
                .filter_map(|(index, info)| {
                    info.first.map(|anchor| (index, cursor.distance(anchor)))
                })
                .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
                .map(|(index, _)| index)
                .unwrap_or(0);

            let info = draw_list.remove(next);
            if let Some(last) = info.last {
                cursor = last;
            }
            ordered.push(info);
        }

        ordered
    }
}

/// Serializable strategy selector for the configuration surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathStrategy {
    #[default]
    Identity,
    TopToBottom,
    LeftToRight,
    NearestNeighbor,
}

impl PathStrategy {
    /// The optimizer implementing this strategy.
    pub fn optimizer(&self) -> Box<dyn PathOptimizer> {
        match self {
            PathStrategy::Identity => Box::new(Identity),
            PathStrategy::TopToBottom => Box::new(TopToBottom),
            PathStrategy::LeftToRight => Box::new(LeftToRight),
            PathStrategy::NearestNeighbor => Box::new(NearestNeighbor),
        }
    }
}
