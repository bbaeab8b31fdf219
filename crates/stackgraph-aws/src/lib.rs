//! stackgraph AWS stack
//!
//! Builders for a containerized web service on Fargate: network topology,
//! access control, load balancing, workload, optional alerting and registry,
//! and the outputs an operator reads back after apply.
//!
//! Each builder takes the resolved [`Configuration`](stackgraph_config::Configuration)
//! plus the handles returned by earlier stages, so a stage can only refer to
//! what already exists.
//!
//! ```rust
//! use stackgraph_aws::synthesize;
//! use stackgraph_config::RawInput;
//!
//! let stack = synthesize(&RawInput::new().with("ALERTS_ENABLED", "true"))?;
//! assert!(stack.graph().get("unhealthy_hosts_alarm").is_some());
//! assert_eq!(stack.graph().output_count(), 4);
//! # Ok::<(), stackgraph_aws::SynthError>(())
//! ```

pub mod access;
pub mod error;
pub mod load_balancing;
pub mod network;
pub mod observability;
pub mod outputs;
pub mod provider;
pub mod registry;
pub mod resources;
pub mod synth;
pub mod workload;

pub use access::{build_access, AccessHandles};
pub use error::SynthError;
pub use load_balancing::{build_load_balancing, LoadBalancerHandles};
pub use network::{build_network, NetworkHandles};
pub use observability::{build_alerting, AlertingHandles};
pub use outputs::emit_outputs;
pub use provider::{configure_backend, configure_provider};
pub use registry::build_registry;
pub use synth::{build, synthesize, SynthesizedStack};
pub use workload::{build_workload, WorkloadHandles};
