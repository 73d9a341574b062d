//! Canned queries over the canonical network tables.
//!
//! The edge/node pairs are meant for the graph validator: `ALL_*` and
//! `party_*` pass the checked path, the movement-type aggregate does not
//! reproduce stored rows and must go through the unchecked path.

/// Every transition.
pub const ALL_NETWORK: &str = "SELECT * FROM network";

/// Every organization.
pub const ALL_NODES: &str = "SELECT * FROM nodes";

/// Transitions between national parties and regional movements, weighted by
/// the number of moves.
pub const MOVEMENT_TYPE_EDGES: &str = "
SELECT
    b.reg_movement AS source,
    c.reg_movement AS target,
    SUM(CAST(a.edge AS INTEGER)) AS weight
FROM network a
LEFT JOIN nodes b ON b.node = a.source
LEFT JOIN nodes c ON c.node = a.target
GROUP BY b.reg_movement, c.reg_movement
ORDER BY 1, 2
";

pub const MOVEMENT_TYPE_NODES: &str = "
SELECT DISTINCT
    reg_movement AS node,
    CASE WHEN reg_movement THEN 'regional' ELSE 'national' END AS p_name
FROM nodes
ORDER BY 1
";

/// Each candidate's events in record order with their canonical organization.
pub const CANDIDATE_PATHS: &str = "
SELECT id_hdv, edge_rec, p_name, node
FROM edges
ORDER BY id_hdv, edge_rec
";

/// Transitions into or out of one organization.
#[must_use]
pub fn party_edges(node: u32) -> String {
    format!("SELECT * FROM network WHERE source = {node} OR target = {node}")
}

/// The organization itself plus every organization it exchanged candidates with.
#[must_use]
pub fn party_nodes(node: u32) -> String {
    format!(
        "SELECT * FROM nodes WHERE node IN (
            SELECT source FROM network WHERE source = {node} OR target = {node}
            UNION
            SELECT target FROM network WHERE source = {node} OR target = {node}
        )"
    )
}
