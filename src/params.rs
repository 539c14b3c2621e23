//! VM parameters.

use crate::consts::{DEFAULT_GAS_LIMIT, DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_SLICE_LEN};

/// How the static flag travels through a plain `CALL`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StaticCallPolicy {
    /// Only `STATICCALL` makes the callee static.
    #[default]
    Explicit,
    /// Once a frame is static, every frame it calls is static too.
    Sticky,
}

/// Parameters of the VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VmParams {
    /// Gas available to a top-level call.
    pub gas_limit: u64,
    /// Maximum nesting of contract calls. The top-level frame has depth zero.
    pub max_call_depth: u32,
    /// Static flag propagation through plain calls.
    pub static_call_policy: StaticCallPolicy,
    /// Maximum length of a memory window an instruction reads, writes or pads, in words.
    ///
    /// Bounds the allocation of a single instruction regardless of the gas limit.
    pub max_slice_len: u32,
}

impl VmParams {
    /// Default parameters.
    pub const DEFAULT: Self = Self {
        gas_limit: DEFAULT_GAS_LIMIT,
        max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        static_call_policy: StaticCallPolicy::Explicit,
        max_slice_len: DEFAULT_MAX_SLICE_LEN,
    };

    /// Replace the gas limit.
    pub const fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Replace the maximum call depth.
    pub const fn with_max_call_depth(mut self, max_call_depth: u32) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    /// Replace the maximum memory window length.
    pub const fn with_max_slice_len(mut self, max_slice_len: u32) -> Self {
        self.max_slice_len = max_slice_len;
        self
    }

    /// Replace the static call policy.
    pub const fn with_static_call_policy(mut self, static_call_policy: StaticCallPolicy) -> Self {
        self.static_call_policy = static_call_policy;
        self
    }
}

impl Default for VmParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}
