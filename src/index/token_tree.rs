// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Incrementally maintained radix tree from tokens to line numbers.
//!
//! Each node holds a label fragment, its children (sorted by the first
//! character of their labels), the lines whose token ends exactly at the node,
//! and `sum`: the number of (line, token) associations at or below it. The
//! sum is what lets a query pick its cheapest entry point without walking
//! anything.
//!
//! Nodes live in an arena (`Vec<Node>`) and point at their parent by index.
//! All structural changes (insert, split, prune) happen in this file; nothing
//! outside can hold a node reference across a mutation.
//!
//! # Invariants
//!
//! - **SUM_CORRECT**: `node.sum == node.lines.len() + Σ child.sum`
//! - **LINES_SORTED**: every `node.lines` is strictly increasing
//! - **CHILDREN_DISTINCT**: sibling labels start with distinct characters
//!
//! `contracts::check_token_tree` asserts all three in debug builds.

use super::{Progress, TokenSource};
use crate::error::{Error, Result};
use crate::types::RecordId;
use crate::util::sorted;
use log::{debug, warn};
use std::ops::ControlFlow;

const ROOT: usize = 0;

#[derive(Debug, Clone, Default)]
struct Node {
    label: String,
    parent: Option<usize>,
    children: Vec<usize>,
    lines: Vec<RecordId>,
    sum: usize,
    live: bool,
}

impl Node {
    fn new(label: &str, parent: Option<usize>) -> Self {
        Self {
            label: label.to_string(),
            parent,
            live: true,
            ..Self::default()
        }
    }

    fn first_char(&self) -> Option<char> {
        self.label.chars().next()
    }
}

/// Build state of a tree. Queries against a `Building` tree are meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeState {
    Ready,
    Building,
}

/// Where a probe lands in the tree.
///
/// `exact` is true when the probe ends exactly at the node's label end, so the
/// node's own lines are exact matches. Otherwise the probe ended inside the
/// label and only prefix matches exist below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    node: usize,
    pub exact: bool,
}

/// Token → lines radix tree.
#[derive(Debug, Clone)]
pub struct TokenTree {
    nodes: Vec<Node>,
    free: Vec<usize>,
    state: TreeState,
}

impl Default for TokenTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte length of the longest common prefix, aligned to char boundaries.
fn common_prefix_bytes(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .take_while(|((_, ca), cb)| ca == cb)
        .last()
        .map(|((i, ca), _)| i + ca.len_utf8())
        .unwrap_or(0)
}

impl TokenTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("", None)],
            free: Vec::new(),
            state: TreeState::Ready,
        }
    }

    /// Drop every node and line. The tree stays `Ready` (and empty).
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::new("", None));
        self.free.clear();
        self.state = TreeState::Ready;
    }

    pub fn state(&self) -> TreeState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == TreeState::Ready
    }

    /// Number of (line, token) associations in the tree.
    pub fn total(&self) -> usize {
        self.nodes[ROOT].sum
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    // =========================================================================
    // NODE PLUMBING
    // =========================================================================

    fn alloc(&mut self, node: Node) -> usize {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn find_child(&self, node: usize, first: char) -> std::result::Result<usize, usize> {
        self.nodes[node]
            .children
            .binary_search_by(|&child| {
                self.nodes[child]
                    .first_char()
                    .unwrap_or('\0')
                    .cmp(&first)
            })
    }

    /// Split `node`'s label at byte `at`. `node` keeps the upper half so its
    /// parent's child list is untouched; a new node takes the lower half along
    /// with the lines and children.
    fn split(&mut self, node: usize, at: usize) {
        let lower_label = self.nodes[node].label.split_off(at);
        let lower = Node {
            label: lower_label,
            parent: Some(node),
            children: std::mem::take(&mut self.nodes[node].children),
            lines: std::mem::take(&mut self.nodes[node].lines),
            sum: self.nodes[node].sum,
            live: true,
        };
        let lower = self.alloc(lower);
        for i in 0..self.nodes[lower].children.len() {
            let child = self.nodes[lower].children[i];
            self.nodes[child].parent = Some(lower);
        }
        self.nodes[node].children.push(lower);
    }

    fn adjust_sum(&mut self, mut node: usize, delta: isize) {
        loop {
            let n = &mut self.nodes[node];
            n.sum = n.sum.checked_add_signed(delta).unwrap_or(0);
            match n.parent {
                Some(parent) => node = parent,
                None => break,
            }
        }
    }

    /// Unlink empty leaves, walking up while parents become empty leaves too.
    fn prune(&mut self, mut node: usize) {
        while node != ROOT {
            let n = &self.nodes[node];
            if !n.live || !n.lines.is_empty() || !n.children.is_empty() {
                return;
            }
            let Some(parent) = n.parent else { return };
            self.nodes[parent].children.retain(|&c| c != node);
            self.nodes[node] = Node::default();
            self.free.push(node);
            node = parent;
        }
    }

    // =========================================================================
    // INSERTION
    // =========================================================================

    /// Associate `line` with each of `tokens`. Empty and repeated tokens are skipped.
    pub fn expand_with(&mut self, line: RecordId, tokens: &[String]) {
        for token in tokens {
            if !token.is_empty() {
                self.insert_token(token, line);
            }
        }
    }

    fn insert_token(&mut self, token: &str, line: RecordId) {
        let mut node = ROOT;
        let mut rest = token;

        while let Some(first) = rest.chars().next() {
            match self.find_child(node, first) {
                Err(pos) => {
                    let child = self.alloc(Node::new(rest, Some(node)));
                    self.nodes[node].children.insert(pos, child);
                    node = child;
                    rest = "";
                }
                Ok(pos) => {
                    let child = self.nodes[node].children[pos];
                    let shared = common_prefix_bytes(&self.nodes[child].label, rest);
                    if shared < self.nodes[child].label.len() {
                        self.split(child, shared);
                    }
                    node = child;
                    rest = &rest[shared..];
                }
            }
        }

        let lines = &mut self.nodes[node].lines;
        if let Err(pos) = lines.binary_search(&line) {
            lines.insert(pos, line);
            self.adjust_sum(node, 1);
        }
    }

    /// Make room for a line inserted at `line`: every stored line `>= line`
    /// moves up by one.
    pub fn shift_lines_from(&mut self, line: RecordId) {
        for node in self.nodes.iter_mut().filter(|n| n.live) {
            let start = node.lines.partition_point(|&l| l < line);
            for l in &mut node.lines[start..] {
                *l += 1;
            }
        }
    }

    // =========================================================================
    // REMOVAL
    // =========================================================================

    /// Remove `line` from every node that references it.
    ///
    /// With `full_removal` the line's record is gone: every larger line number
    /// drops by one. Without it only this line's associations go, ready to be
    /// re-expanded with [`TokenTree::expand_with`]. Returns the number of
    /// associations removed.
    pub fn remove_line(&mut self, line: RecordId, full_removal: bool) -> usize {
        let mut touched = Vec::new();
        for (id, node) in self.nodes.iter_mut().enumerate() {
            if !node.live {
                continue;
            }
            let removed = if full_removal {
                sorted::remove_and_shift(&mut node.lines, line)
            } else {
                match node.lines.binary_search(&line) {
                    Ok(pos) => {
                        node.lines.remove(pos);
                        true
                    }
                    Err(_) => false,
                }
            };
            if removed {
                touched.push(id);
            }
        }

        for &id in &touched {
            self.adjust_sum(id, -1);
        }
        for &id in &touched {
            self.prune(id);
        }
        touched.len()
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Walk the tree along `text`, returning the node that covers every token
    /// starting with `text`, or `None` if no token does.
    pub fn find_container(&self, text: &str) -> Option<Container> {
        let mut node = ROOT;
        let mut rest = text;
        loop {
            let Some(first) = rest.chars().next() else {
                return Some(Container { node, exact: true });
            };
            let pos = self.find_child(node, first).ok()?;
            let child = self.nodes[node].children[pos];
            let label = self.nodes[child].label.as_str();
            if let Some(after) = rest.strip_prefix(label) {
                node = child;
                rest = after;
            } else if label.starts_with(rest) {
                return Some(Container {
                    node: child,
                    exact: false,
                });
            } else {
                return None;
            }
        }
    }

    /// Number of lines a lookup from `container` would produce.
    pub fn cost(&self, container: Container, exact: bool) -> usize {
        match (exact, container.exact) {
            (true, true) => self.nodes[container.node].lines.len(),
            (true, false) => 0,
            (false, _) => self.nodes[container.node].sum,
        }
    }

    /// Lines whose token equals the probe that produced `container`.
    pub fn exact_lines(&self, container: Container) -> &[RecordId] {
        if container.exact {
            &self.nodes[container.node].lines
        } else {
            &[]
        }
    }

    /// Every line at or below `container`, sorted and deduplicated.
    pub fn collect_lines(&self, container: Container) -> Vec<RecordId> {
        let mut out = Vec::with_capacity(self.nodes[container.node].sum);
        let mut stack = vec![container.node];
        while let Some(node) = stack.pop() {
            let n = &self.nodes[node];
            out.extend_from_slice(&n.lines);
            stack.extend_from_slice(&n.children);
        }
        sorted::sort_dedup(&mut out);
        out
    }

    /// Lines whose token equals `text` (`exact`) or starts with it.
    pub fn lines_for(&self, text: &str, exact: bool) -> Vec<RecordId> {
        if text.is_empty() {
            return Vec::new();
        }
        match self.find_container(text) {
            Some(container) if exact => self.exact_lines(container).to_vec(),
            Some(container) => self.collect_lines(container),
            None => Vec::new(),
        }
    }

    /// Every (token, line) association, in depth-first order.
    pub fn associations(&self) -> Vec<(String, RecordId)> {
        let mut out = Vec::with_capacity(self.total());
        let mut stack = vec![(ROOT, String::new())];
        while let Some((node, prefix)) = stack.pop() {
            let n = &self.nodes[node];
            let token = format!("{}{}", prefix, n.label);
            out.extend(n.lines.iter().map(|&line| (token.clone(), line)));
            for &child in &n.children {
                stack.push((child, token.clone()));
            }
        }
        out
    }

    /// True if SUM_CORRECT, LINES_SORTED and CHILDREN_DISTINCT hold everywhere.
    pub(crate) fn is_well_formed(&self) -> bool {
        self.nodes.iter().filter(|n| n.live).all(|n| {
            let child_sum: usize = n.children.iter().map(|&c| self.nodes[c].sum).sum();
            let firsts: Vec<Option<char>> =
                n.children.iter().map(|&c| self.nodes[c].first_char()).collect();
            n.sum == n.lines.len() + child_sum
                && sorted::is_strictly_increasing(&n.lines)
                && firsts.windows(2).all(|w| w[0] < w[1])
        })
    }

    // =========================================================================
    // REBUILD
    // =========================================================================

    /// Tear down and re-insert every line of `source`.
    ///
    /// `progress` is polled every `interval` lines; returning
    /// `ControlFlow::Break` stops the build and leaves the tree in
    /// [`TreeState::Building`] until a later rebuild completes.
    pub fn rebuild<S: TokenSource + ?Sized>(
        &mut self,
        source: &S,
        interval: usize,
        progress: Progress<'_>,
    ) -> Result<()> {
        self.clear();
        self.state = TreeState::Building;

        let total = source.line_count();
        for line in 0..total {
            if interval > 0 && line % interval == 0 && progress(line, total).is_break() {
                warn!("token tree build aborted at line {} of {}", line, total);
                return Err(Error::BuildAborted { done: line, total });
            }
            self.expand_with(line as RecordId, &source.line_tokens(line));
        }

        self.state = TreeState::Ready;
        crate::contracts::check_token_tree(self);
        if let ControlFlow::Break(()) = progress(total, total) {
            debug!("progress callback asked to stop after the build finished");
        }
        debug!(
            "token tree rebuilt: {} lines, {} associations, {} nodes",
            total,
            self.total(),
            self.node_count()
        );
        Ok(())
    }
}
