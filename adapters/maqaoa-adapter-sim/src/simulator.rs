//! Simulator executor implementation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::{FxHashMap, FxHashSet};
use std::time::Instant;
use tracing::{debug, instrument};

use maqaoa_hal::{
    Capabilities, Counts, ExecutionResult, Executor, ExecutorConfig, ExecutorFactory, HalError,
    HalResult,
};
use maqaoa_ir::{Circuit, InstructionKind};

use crate::statevector::Statevector;

const DEFAULT_MAX_QUBITS: u32 = 20;

/// Local statevector executor.
///
/// Each call to [`Executor::execute`] evolves the state once and draws
/// `shots` outcomes from the exact probabilities. Outcomes come from a
/// single [`StdRng`] seeded at construction, so a seeded executor yields
/// the same sequence of histograms on every run.
pub struct SimulatorBackend {
    config: ExecutorConfig,
    capabilities: Capabilities,
    max_qubits: u32,
    rng: StdRng,
}

impl SimulatorBackend {
    /// Create a simulator seeded from OS entropy.
    pub fn new() -> Self {
        Self::build(
            ExecutorConfig::new("simulator"),
            DEFAULT_MAX_QUBITS,
            StdRng::from_entropy(),
        )
    }

    /// Create a simulator with a fixed sampling seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(
            ExecutorConfig::new("simulator"),
            DEFAULT_MAX_QUBITS,
            StdRng::seed_from_u64(seed),
        )
    }

    /// Limit the number of qubits this simulator accepts.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self.capabilities = Capabilities::simulator(max_qubits).with_name(&self.config.name);
        self
    }

    fn build(config: ExecutorConfig, max_qubits: u32, rng: StdRng) -> Self {
        let capabilities = Capabilities::simulator(max_qubits).with_name(&config.name);
        Self {
            config,
            capabilities,
            max_qubits,
            rng,
        }
    }

    /// Map of measured qubit to classical bit, in measurement order.
    fn measurement_map(circuit: &Circuit) -> HalResult<Vec<(usize, usize)>> {
        let mut map = Vec::new();
        for (_, inst) in circuit.dag().topological_ops()? {
            if inst.is_measure() {
                map.push((inst.qubits[0].index(), inst.clbits[0].index()));
            }
        }
        Ok(map)
    }

    /// Render a basis index as a readout string, classical bit 0 rightmost.
    fn readout(outcome: usize, map: &[(usize, usize)], num_clbits: usize) -> String {
        let mut bits = vec![b'0'; num_clbits];
        for &(qubit, clbit) in map {
            bits[num_clbits - 1 - clbit] = if (outcome >> qubit) & 1 == 1 {
                b'1'
            } else {
                b'0'
            };
        }
        bits.into_iter().map(char::from).collect()
    }

    #[instrument(skip(self, circuit))]
    fn run_simulation(&mut self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        let start = Instant::now();

        let num_qubits = circuit.num_qubits();
        debug!("Starting simulation: {} qubits, {} shots", num_qubits, shots);

        let mut sv = Statevector::new(num_qubits);
        for (_, inst) in circuit.dag().topological_ops()? {
            sv.apply(inst)?;
        }

        let mut cumulative = Vec::with_capacity(1 << num_qubits);
        let mut acc = 0.0;
        for p in sv.probabilities() {
            acc += p;
            cumulative.push(acc);
        }
        let last = cumulative.len() - 1;

        let mut outcomes: FxHashMap<usize, u64> = FxHashMap::default();
        for _ in 0..shots {
            let r: f64 = self.rng.r#gen::<f64>() * acc;
            let outcome = cumulative.partition_point(|&c| c <= r).min(last);
            *outcomes.entry(outcome).or_insert(0) += 1;
        }

        let map = Self::measurement_map(circuit)?;
        let num_clbits = circuit.num_clbits();
        let mut counts = Counts::new();
        for (outcome, n) in outcomes {
            counts.insert(Self::readout(outcome, &map, num_clbits), n);
        }

        let elapsed = start.elapsed();
        debug!(
            "Simulation completed in {:?}, {} distinct outcomes",
            elapsed,
            counts.len()
        );

        Ok(ExecutionResult::new(counts, shots)
            .with_execution_time(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)))
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn validate(&self, circuit: &Circuit) -> HalResult<()> {
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.max_qubits
            )));
        }

        let mut measured = FxHashSet::default();
        let mut any_measure = false;
        for (_, inst) in circuit.dag().topological_ops()? {
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    if !self.capabilities.supports(gate.name()) {
                        return Err(HalError::Unsupported(format!(
                            "gate '{}' is not supported by {}",
                            gate.name(),
                            self.name()
                        )));
                    }
                    if gate.is_symbolic() {
                        return Err(HalError::InvalidCircuit(format!(
                            "gate '{gate}' has unbound parameters"
                        )));
                    }
                    if let Some(q) = inst.qubits.iter().find(|q| measured.contains(*q)) {
                        return Err(HalError::Unsupported(format!(
                            "gate '{}' on {} after measurement",
                            gate.name(),
                            q
                        )));
                    }
                }
                InstructionKind::Measure => {
                    any_measure = true;
                    measured.extend(inst.qubits.iter().copied());
                }
                InstructionKind::Barrier => {}
            }
        }

        if !any_measure {
            return Err(HalError::InvalidCircuit(
                "circuit has no measurements".into(),
            ));
        }
        Ok(())
    }

    fn execute(&mut self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be positive".into()));
        }
        if shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{} shots exceeds the limit of {}",
                shots, self.capabilities.max_shots
            )));
        }
        self.validate(circuit)?;
        self.run_simulation(circuit, shots)
    }
}

impl ExecutorFactory for SimulatorBackend {
    fn from_config(config: ExecutorConfig) -> HalResult<Self> {
        let max_qubits = match config.extra_u64("max_qubits") {
            Some(v) => u32::try_from(v).map_err(|_| {
                HalError::Configuration(format!("max_qubits {v} out of range"))
            })?,
            None => DEFAULT_MAX_QUBITS,
        };
        let rng = config
            .extra_u64("seed")
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        Ok(Self::build(config, max_qubits, rng))
    }
}
