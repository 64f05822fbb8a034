//! Executor trait and configuration.
//!
//! An [`Executor`] runs a fully bound circuit for a number of shots and
//! returns a histogram of classical readouts:
//!
//! ```text
//!   capabilities() ──→ validate() ──→ execute()
//!    (&self)            (&self)        (&mut self)
//! ```
//!
//! `execute` takes `&mut self` so executors can own mutable state such as
//! a seeded random number generator.

use serde::{Deserialize, Serialize};

use maqaoa_ir::Circuit;

use crate::capability::Capabilities;
use crate::error::HalResult;
use crate::result::ExecutionResult;

/// Name plus free-form settings such as `seed` or `max_qubits`.
///
/// Settings flatten into the same map when (de)serialized, so
/// `{"name": "simulator", "seed": 7}` round-trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ExecutorConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Setting `key` as a non-negative integer.
    pub fn extra_u64(&self, key: &str) -> Option<u64> {
        self.extra.get(key)?.as_u64()
    }
}

/// A circuit executor.
///
/// # Contract
///
/// - `capabilities()` is infallible and cached at construction.
/// - `validate()` rejects circuits the executor cannot run.
/// - `execute()` runs a bound circuit and returns counts keyed by
///   readout string, classical bit 0 rightmost. Each key has exactly
///   `circuit.num_clbits()` characters.
pub trait Executor {
    /// Name of this executor.
    fn name(&self) -> &str;

    /// Capabilities of this executor.
    fn capabilities(&self) -> &Capabilities;

    /// Check a circuit against executor constraints.
    fn validate(&self, circuit: &Circuit) -> HalResult<()>;

    /// Run a bound circuit for `shots` repetitions.
    fn execute(&mut self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult>;
}

impl<E: Executor + ?Sized> Executor for &mut E {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn capabilities(&self) -> &Capabilities {
        (**self).capabilities()
    }

    fn validate(&self, circuit: &Circuit) -> HalResult<()> {
        (**self).validate(circuit)
    }

    fn execute(&mut self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        (**self).execute(circuit, shots)
    }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn capabilities(&self) -> &Capabilities {
        (**self).capabilities()
    }

    fn validate(&self, circuit: &Circuit) -> HalResult<()> {
        (**self).validate(circuit)
    }

    fn execute(&mut self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        (**self).execute(circuit, shots)
    }
}

/// Trait for creating executors from configuration.
pub trait ExecutorFactory: Executor + Sized {
    /// Create an executor from configuration.
    fn from_config(config: ExecutorConfig) -> HalResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HalError;
    use crate::result::Counts;

    struct Fixed {
        caps: Capabilities,
    }

    impl Executor for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }

        fn validate(&self, circuit: &Circuit) -> HalResult<()> {
            if circuit.num_qubits() > self.caps.num_qubits as usize {
                return Err(HalError::CircuitTooLarge("too many qubits".into()));
            }
            Ok(())
        }

        fn execute(&mut self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
            self.validate(circuit)?;
            let key = "0".repeat(circuit.num_clbits());
            let counts: Counts = [(key, u64::from(shots))].into_iter().collect();
            Ok(ExecutionResult::new(counts, shots))
        }
    }

    #[test]
    fn test_executor_config_settings() {
        let config = ExecutorConfig::new("simulator")
            .with_extra("seed", serde_json::json!(42))
            .with_extra("label", serde_json::json!("x"));

        assert_eq!(config.name, "simulator");
        assert_eq!(config.extra_u64("seed"), Some(42));
        assert_eq!(config.extra_u64("label"), None);
        assert_eq!(config.extra_u64("missing"), None);
    }

    #[test]
    fn test_executor_config_flattens_settings() {
        let config: ExecutorConfig =
            serde_json::from_str(r#"{"name": "simulator", "max_qubits": 12}"#).unwrap();
        assert_eq!(config.extra_u64("max_qubits"), Some(12));

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["max_qubits"], 12);
    }

    #[test]
    fn test_executor_through_references() {
        let mut fixed = Fixed {
            caps: Capabilities::simulator(2),
        };
        let circuit = Circuit::with_size("c", 2, 2);

        fn run<E: Executor>(mut executor: E, circuit: &Circuit) -> HalResult<ExecutionResult> {
            executor.execute(circuit, 10)
        }
        let result = run(&mut fixed, &circuit).unwrap();
        assert_eq!(result.counts.get("00"), 10);

        let mut boxed: Box<dyn Executor> = Box::new(Fixed {
            caps: Capabilities::simulator(1),
        });
        assert_eq!(boxed.name(), "fixed");
        assert!(matches!(
            boxed.execute(&circuit, 1),
            Err(HalError::CircuitTooLarge(_))
        ));
    }
}
