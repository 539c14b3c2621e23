//! Per-call execution environment.

use crate::field::Fr;

use std::fmt;

/// Contract address.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address(Fr);

impl Address {
    /// Wrap a field element as an address.
    pub const fn new(value: Fr) -> Self {
        Self(value)
    }

    /// Field element backing this address.
    pub const fn as_field(&self) -> &Fr {
        &self.0
    }

    #[cfg(feature = "random")]
    /// Random address.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: rand::Rng + ?Sized,
    {
        Self(Fr::random(rng))
    }
}

impl From<Fr> for Address {
    fn from(value: Fr) -> Self {
        Self(value)
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Self(Fr::from(value))
    }
}

impl From<Address> for Fr {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({:#x})", self.0.as_biguint())
    }
}

/// Chain-wide variables shared by every frame of a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalVariables {
    /// Chain identifier.
    pub chain_id: Fr,
    /// Protocol version.
    pub version: Fr,
    /// Height of the block including the transaction.
    pub block_number: Fr,
    /// Timestamp of the block including the transaction.
    pub timestamp: Fr,
}

/// Variables readable through `GETENVVAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::FromRepr)]
#[repr(u8)]
pub enum EnvironmentVariable {
    /// Address of the executing contract.
    Address = 0x00,
    /// Address of the caller.
    Sender = 0x01,
    /// Fee paid by the transaction.
    TransactionFee = 0x02,
    /// Chain identifier.
    ChainId = 0x03,
    /// Protocol version.
    Version = 0x04,
    /// Current block height.
    BlockNumber = 0x05,
    /// Current block timestamp.
    Timestamp = 0x06,
    /// `1` inside a static call, `0` otherwise.
    IsStaticCall = 0x07,
    /// Nesting depth of the current frame.
    CallDepth = 0x08,
}

impl TryFrom<u32> for EnvironmentVariable {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::from_repr)
            .ok_or(value)
    }
}

/// Immutable record describing the frame being executed.
///
/// Nested frames get a derived copy; an environment is never mutated once a frame started.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionEnvironment {
    address: Address,
    sender: Address,
    function_name: String,
    contract_call_depth: u32,
    transaction_fee: Fr,
    globals: GlobalVariables,
    is_static_call: bool,
    calldata: Vec<Fr>,
}

impl ExecutionEnvironment {
    /// Environment of a top-level, non-static frame.
    pub fn new(
        address: Address,
        sender: Address,
        function_name: impl Into<String>,
        transaction_fee: Fr,
        globals: GlobalVariables,
        calldata: Vec<Fr>,
    ) -> Self {
        Self {
            address,
            sender,
            function_name: function_name.into(),
            contract_call_depth: 0,
            transaction_fee,
            globals,
            is_static_call: false,
            calldata,
        }
    }

    /// Mark the frame as static.
    pub fn into_static(mut self) -> Self {
        self.is_static_call = true;
        self
    }

    /// Executing contract.
    pub const fn address(&self) -> &Address {
        &self.address
    }

    /// Caller of the executing contract.
    pub const fn sender(&self) -> &Address {
        &self.sender
    }

    /// Name of the called function, for tracing.
    pub fn function_name(&self) -> &str {
        self.function_name.as_str()
    }

    /// Number of nested calls above this frame.
    pub const fn contract_call_depth(&self) -> u32 {
        self.contract_call_depth
    }

    /// Fee paid by the transaction.
    pub const fn transaction_fee(&self) -> &Fr {
        &self.transaction_fee
    }

    /// Chain variables.
    pub const fn globals(&self) -> &GlobalVariables {
        &self.globals
    }

    /// Whether state modifications are forbidden.
    pub const fn is_static_call(&self) -> bool {
        self.is_static_call
    }

    /// Input of the frame.
    pub fn calldata(&self) -> &[Fr] {
        self.calldata.as_slice()
    }

    /// Value of an environment variable.
    pub fn variable(&self, var: EnvironmentVariable) -> Fr {
        use EnvironmentVariable::*;

        match var {
            Address => self.address.as_field().clone(),
            Sender => self.sender.as_field().clone(),
            TransactionFee => self.transaction_fee.clone(),
            ChainId => self.globals.chain_id.clone(),
            Version => self.globals.version.clone(),
            BlockNumber => self.globals.block_number.clone(),
            Timestamp => self.globals.timestamp.clone(),
            IsStaticCall => Fr::from(self.is_static_call),
            CallDepth => Fr::from(self.contract_call_depth),
        }
    }

    /// Same environment with a different calldata.
    pub fn with_calldata(&self, calldata: Vec<Fr>) -> Self {
        Self {
            calldata,
            ..self.clone()
        }
    }

    /// Environment of a plain nested call to `target`.
    ///
    /// The new frame is never static, regardless of this frame.
    pub fn derive_for_nested_call(
        &self,
        target: Address,
        calldata: Vec<Fr>,
        function_name: impl Into<String>,
    ) -> Self {
        self.derive(target, calldata, function_name.into(), false)
    }

    /// Environment of a nested static call to `target`.
    pub fn derive_for_nested_static_call(
        &self,
        target: Address,
        calldata: Vec<Fr>,
        function_name: impl Into<String>,
    ) -> Self {
        self.derive(target, calldata, function_name.into(), true)
    }

    fn derive(&self, target: Address, calldata: Vec<Fr>, function_name: String, is_static_call: bool) -> Self {
        Self {
            address: target,
            sender: self.address.clone(),
            function_name,
            contract_call_depth: self.contract_call_depth.saturating_add(1),
            transaction_fee: self.transaction_fee.clone(),
            globals: self.globals.clone(),
            is_static_call,
            calldata,
        }
    }
}
