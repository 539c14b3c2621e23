//! VM utilities

#[allow(missing_docs)]
#[cfg(feature = "test-helpers")]
/// Testing utilities
pub mod test_helpers {
    use crate::decoder::encode;
    use crate::environment::{Address, ExecutionEnvironment, GlobalVariables};
    use crate::executor::Executor;
    use crate::field::Fr;
    use crate::instruction::Instruction;
    use crate::params::VmParams;
    use crate::state::CallResult;
    use crate::storage::MemoryStorage;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    pub struct TestBuilder {
        rng: StdRng,
        storage: MemoryStorage,
        sender: Address,
        transaction_fee: Fr,
        globals: GlobalVariables,
        params: VmParams,
        is_static_call: bool,
    }

    impl TestBuilder {
        pub fn new(seed: u64) -> Self {
            let mut rng = StdRng::seed_from_u64(seed);
            let sender = Address::random(&mut rng);

            TestBuilder {
                rng,
                storage: MemoryStorage::default(),
                sender,
                transaction_fee: Fr::zero(),
                globals: GlobalVariables::default(),
                params: VmParams::DEFAULT,
                is_static_call: false,
            }
        }

        pub fn gas_limit(&mut self, limit: u64) -> &mut TestBuilder {
            self.params.gas_limit = limit;
            self
        }

        pub fn params(&mut self, params: VmParams) -> &mut TestBuilder {
            self.params = params;
            self
        }

        pub fn globals(&mut self, globals: GlobalVariables) -> &mut TestBuilder {
            self.globals = globals;
            self
        }

        pub fn sender(&mut self, sender: Address) -> &mut TestBuilder {
            self.sender = sender;
            self
        }

        pub fn transaction_fee(&mut self, fee: Fr) -> &mut TestBuilder {
            self.transaction_fee = fee;
            self
        }

        pub fn static_call(&mut self, is_static_call: bool) -> &mut TestBuilder {
            self.is_static_call = is_static_call;
            self
        }

        pub fn rng(&mut self) -> &mut StdRng {
            &mut self.rng
        }

        pub fn random_address(&mut self) -> Address {
            Address::random(&mut self.rng)
        }

        /// Deploy a program at its content address.
        pub fn deploy(&mut self, program: &[Instruction]) -> Address {
            self.storage.deploy(encode(program))
        }

        /// Deploy raw bytecode at a random address.
        pub fn deploy_bytecode(&mut self, bytecode: Vec<u8>) -> Address {
            let address = self.random_address();

            self.storage.insert_contract(address.clone(), bytecode);

            address
        }

        pub fn environment(&self, address: Address, calldata: Vec<Fr>) -> ExecutionEnvironment {
            let environment = ExecutionEnvironment::new(
                address,
                self.sender.clone(),
                "",
                self.transaction_fee.clone(),
                self.globals.clone(),
                calldata,
            );

            if self.is_static_call {
                environment.into_static()
            } else {
                environment
            }
        }

        /// Call the contract at `address` as a top-level frame.
        pub fn call(&mut self, address: &Address, calldata: Vec<Fr>) -> anyhow::Result<CallResult> {
            let environment = self.environment(address.clone(), vec![]);
            let mut executor = Executor::new(&mut self.storage, environment, self.params);

            Ok(executor.call(calldata)?)
        }

        /// Deploy `program` and call it.
        pub fn execute(&mut self, program: &[Instruction], calldata: Vec<Fr>) -> anyhow::Result<CallResult> {
            let address = self.deploy(program);

            self.call(&address, calldata)
        }

        pub fn storage(&self) -> &MemoryStorage {
            &self.storage
        }

        pub fn storage_mut(&mut self) -> &mut MemoryStorage {
            &mut self.storage
        }

        pub fn contract_state(&self, address: &Address, slot: u64) -> Fr {
            self.storage.contract_state(address, &Fr::from(slot))
        }
    }
}
