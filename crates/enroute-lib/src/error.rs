use thiserror::Error;

/// Convenient result alias for the enroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a query references a node name absent from the topology.
    #[error("unknown node name: {name}{}", format_suggestions(.suggestions))]
    UnknownNode {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a node is declared with a negative or non-finite power draw.
    #[error("invalid power draw for node {node}: {message}")]
    InvalidPowerDraw { node: String, message: String },

    /// Raised when a connection names the same node on both ends.
    #[error("refusing to connect node {name} to itself")]
    SelfLoop { name: String },

    /// Raised when the configured cost function yields a value relaxation cannot use.
    #[error("cost function returned {cost} for energies ({energy_a}, {energy_b}); costs must be finite and non-negative")]
    InvalidCost {
        energy_a: f64,
        energy_b: f64,
        cost: f64,
    },

    /// Raised when a custom cost table is empty or not monotone.
    #[error("invalid cost table: {message}")]
    InvalidCostTable { message: String },

    /// Raised when a topology file row cannot be interpreted.
    #[error("invalid topology file at line {line}: {message}")]
    TopologyFormat { line: u64, message: String },

    /// Raised when a topology file row is rejected by the topology itself.
    #[error("invalid topology file at line {line}: {source}")]
    InvalidRow { line: u64, source: Box<Error> },

    /// Raised when a bounded search runs past its deadline.
    #[error("path search exceeded its deadline after {passes} relaxation passes")]
    DeadlineExceeded { passes: usize },

    /// Raised when a pass cap stops relaxation before distances settle.
    #[error("path search stopped after {passes} relaxation passes without settling")]
    PassLimitReached { passes: usize },

    /// Raised when a shared topology lock was poisoned by a panicking writer.
    #[error("shared topology lock was poisoned")]
    LockPoisoned,

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
