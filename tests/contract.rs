use aztec_avm::instruction::*;
use aztec_avm::prelude::*;

type CallOp = fn(u32, u32, u32, u32, u32, u32, u32) -> Instruction;

const GAS_FORWARDED: u32 = 100_000;

/// Call the contract at `calldata[0]` with `args`, returning `[success, data[..ret_size]]`.
fn caller(op: CallOp, args: &[u32], ret_size: u32) -> Vec<Instruction> {
    let mut program = vec![calldata_copy(0, 1, 1), set(GAS_FORWARDED, 0)];

    program.extend(args.iter().enumerate().map(|(i, a)| set(*a, 10 + i as u32)));
    program.extend([
        set(args.len() as u32, 3),
        op(0, 1, 10, 3, 20, ret_size, 19),
        ret(19, ret_size + 1),
    ]);

    program
}

/// Return `calldata[0] + calldata[1]`.
fn adder() -> Vec<Instruction> {
    vec![calldata_copy(0, 2, 0), add(0, 1, 2), ret(2, 1)]
}

/// Write `1` at slot `7`.
fn writer() -> Vec<Instruction> {
    vec![set(1, 0), set(7, 1), sstore(0, 1)]
}

fn returns_variable(var: EnvironmentVariable) -> Vec<Instruction> {
    vec![get_env_var(var as u32, 0), ret(0, 1)]
}

fn fr(values: &[u64]) -> Vec<Fr> {
    values.iter().copied().map(Fr::from).collect()
}

#[test]
fn nested_call_returns_data() {
    let mut test_context = TestBuilder::new(2322u64);

    let callee = test_context.deploy(&adder());
    let caller = test_context.deploy(&caller(call, &[40, 2], 1));

    let result = test_context
        .call(&caller, vec![Fr::from(callee)])
        .expect("failed to call");

    assert!(!result.reverted());
    assert_eq!(result.return_data(), fr(&[1, 42]).as_slice());
}

#[test]
fn return_data_is_padded_and_truncated() {
    let mut test_context = TestBuilder::new(2322u64);

    let callee = test_context.deploy(&[set(1, 0), set(2, 1), set(3, 2), ret(0, 3)]);

    let short = test_context.deploy(&caller(call, &[], 2));
    let long = test_context.deploy(&caller(call, &[], 5));

    let short = test_context
        .call(&short, vec![Fr::from(callee.clone())])
        .expect("failed to call");
    let long = test_context
        .call(&long, vec![Fr::from(callee)])
        .expect("failed to call");

    assert_eq!(short.return_data(), fr(&[1, 1, 2]).as_slice());
    assert_eq!(long.return_data(), fr(&[1, 1, 2, 3, 0, 0]).as_slice());
}

#[test]
fn callee_sees_the_caller_as_sender() {
    let mut test_context = TestBuilder::new(2322u64);

    let callee = test_context.deploy(&returns_variable(EnvironmentVariable::Sender));
    let caller = test_context.deploy(&caller(call, &[], 1));

    let result = test_context
        .call(&caller, vec![Fr::from(callee)])
        .expect("failed to call");

    assert_eq!(result.return_data(), &[Fr::one(), Fr::from(caller)]);
}

#[test]
fn callee_gas_is_charged_to_the_caller() {
    let mut test_context = TestBuilder::new(2322u64);

    let callee = test_context.deploy(&adder());
    let direct = test_context
        .call(&callee, fr(&[40, 2]))
        .expect("failed to call");

    let caller = test_context.deploy(&caller(call, &[40, 2], 1));
    let nested = test_context
        .call(&caller, vec![Fr::from(callee)])
        .expect("failed to call");

    assert!(nested.gas_used() > direct.gas_used());
}

#[test]
fn missing_contract_fails_the_callee_only() {
    let mut test_context = TestBuilder::new(2322u64);

    let missing = test_context.random_address();
    let caller = test_context.deploy(&caller(call, &[], 1));

    let result = test_context
        .call(&caller, vec![Fr::from(missing)])
        .expect("failed to call");

    assert!(!result.reverted());
    assert_eq!(result.return_data(), &[Fr::zero(), Fr::zero()]);
    assert!(result.gas_used() > GAS_FORWARDED as u64);
}

#[test]
fn malformed_contract_fails_the_callee_only() {
    let mut test_context = TestBuilder::new(2322u64);

    let malformed = test_context.deploy_bytecode(vec![0xff, 0x01]);
    let caller = test_context.deploy(&caller(call, &[], 1));

    let result = test_context
        .call(&caller, vec![Fr::from(malformed)])
        .expect("failed to call");

    assert!(!result.reverted());
    assert_eq!(result.return_data(), &[Fr::zero(), Fr::zero()]);
}

#[test]
fn callee_revert_data_is_returned() {
    let mut test_context = TestBuilder::new(2322u64);

    let callee = test_context.deploy(&[set(0xbad, 0), revert(0, 1)]);
    let caller = test_context.deploy(&caller(call, &[], 1));

    let result = test_context
        .call(&caller, vec![Fr::from(callee)])
        .expect("failed to call");

    assert_eq!(result.return_data(), &[Fr::zero(), Fr::from(0xbadu64)]);
}

#[test]
fn callee_revert_discards_its_writes_only() {
    let mut test_context = TestBuilder::new(2322u64);

    let mut reverting_writer = writer();
    reverting_writer.push(revert(0, 0));
    let callee = test_context.deploy(&reverting_writer);

    // write slot 7 of the caller, then call
    let mut program = writer();
    program.extend(caller(call, &[], 0));
    let caller = test_context.deploy(&program);

    let result = test_context
        .call(&caller, vec![Fr::from(callee.clone())])
        .expect("failed to call");

    assert_eq!(result.return_data(), &[Fr::zero()]);
    assert_eq!(test_context.contract_state(&caller, 7), Fr::one());
    assert_eq!(test_context.contract_state(&callee, 7), Fr::zero());
}

#[test]
fn caller_revert_discards_committed_callee_writes() {
    let mut test_context = TestBuilder::new(2322u64);

    let callee = test_context.deploy(&writer());

    let mut program = caller(call, &[], 0);
    let last = program.len() - 1;
    program[last] = revert(19, 1);
    let caller = test_context.deploy(&program);

    let result = test_context
        .call(&caller, vec![Fr::from(callee.clone())])
        .expect("failed to call");

    assert!(result.reverted());
    assert_eq!(result.return_data(), &[Fr::one()]);
    assert_eq!(test_context.contract_state(&callee, 7), Fr::zero());
    assert_eq!(test_context.storage().checkpoints(), 0);
}

#[test]
fn static_call_forbids_writes() {
    let mut test_context = TestBuilder::new(2322u64);

    let callee = test_context.deploy(&writer());
    let caller = test_context.deploy(&caller(static_call, &[], 0));

    let result = test_context
        .call(&caller, vec![Fr::from(callee.clone())])
        .expect("failed to call");

    assert!(!result.reverted());
    assert_eq!(result.return_data(), &[Fr::zero()]);
    assert_eq!(test_context.contract_state(&callee, 7), Fr::zero());
}

#[test]
fn static_call_returns_data() {
    let mut test_context = TestBuilder::new(2322u64);

    let callee = test_context.deploy(&adder());
    let caller = test_context.deploy(&caller(static_call, &[1, 2], 1));

    let result = test_context
        .call(&caller, vec![Fr::from(callee)])
        .expect("failed to call");

    assert_eq!(result.return_data(), fr(&[1, 3]).as_slice());
}

fn nested_static_flag(policy: StaticCallPolicy) -> Fr {
    let mut test_context = TestBuilder::new(2322u64);

    test_context
        .params(VmParams::DEFAULT.with_static_call_policy(policy))
        .static_call(true);

    let callee = test_context.deploy(&returns_variable(EnvironmentVariable::IsStaticCall));
    let caller = test_context.deploy(&caller(call, &[], 1));

    let result = test_context
        .call(&caller, vec![Fr::from(callee)])
        .expect("failed to call");

    assert_eq!(result.return_data()[0], Fr::one());

    result.return_data()[1].clone()
}

#[test]
fn plain_call_from_a_static_frame_follows_the_policy() {
    assert_eq!(nested_static_flag(StaticCallPolicy::Explicit), Fr::zero());
    assert_eq!(nested_static_flag(StaticCallPolicy::Sticky), Fr::one());
}

/// Call itself through `calldata[0]` and return the number of successful nested calls.
fn recursive() -> Vec<Instruction> {
    vec![
        calldata_copy(0, 1, 10),
        set(u32::MAX, 0),
        set(1, 3),
        call(0, 10, 10, 3, 20, 1, 21),
        add(20, 21, 40),
        ret(40, 1),
    ]
}

#[test]
fn call_depth_is_bounded() {
    for max_call_depth in [0, 1, 5] {
        let mut test_context = TestBuilder::new(2322u64);

        test_context.params(VmParams::DEFAULT.with_max_call_depth(max_call_depth));

        let address = test_context.deploy(&recursive());
        let result = test_context
            .call(&address, vec![Fr::from(address.clone())])
            .expect("failed to call");

        assert!(!result.reverted());
        assert_eq!(result.return_data(), &[Fr::from(max_call_depth)]);
    }
}

#[test]
fn call_depth_is_readable() {
    let mut test_context = TestBuilder::new(2322u64);

    let callee = test_context.deploy(&returns_variable(EnvironmentVariable::CallDepth));
    let caller = test_context.deploy(&caller(call, &[], 1));

    let result = test_context
        .call(&caller, vec![Fr::from(callee)])
        .expect("failed to call");

    assert_eq!(result.return_data(), &[Fr::one(), Fr::one()]);
}

#[test]
fn argument_count_out_of_range_reverts() {
    let result = TestBuilder::new(2322u64)
        .execute(
            &[set(1, 5), sub(6, 5, 3), call(0, 1, 10, 3, 20, 0, 21), ret(21, 1)],
            vec![],
        )
        .expect("failed to execute");

    assert!(result.reverted());
    assert_eq!(result.revert_reason(), Some(RevertReason::OperandOutOfRange));
}

#[test]
fn return_data_beyond_ret_size_is_readable() {
    let mut test_context = TestBuilder::new(2322u64);

    let callee = test_context.deploy(&[set(1, 0), set(2, 1), set(3, 2), ret(0, 3)]);

    // keep one word in the call window, then read the rest back
    let mut program = caller(call, &[], 1);
    program.pop();
    program.extend([
        returndata_size(21),
        set(1, 31),
        set(2, 32),
        returndata_copy(31, 32, 22),
        ret(19, 5),
    ]);
    let caller = test_context.deploy(&program);

    let result = test_context
        .call(&caller, vec![Fr::from(callee)])
        .expect("failed to call");

    assert_eq!(result.return_data(), fr(&[1, 1, 3, 2, 3]).as_slice());
}

#[test]
fn revert_data_is_readable_after_the_call() {
    let mut test_context = TestBuilder::new(2322u64);

    let callee = test_context.deploy(&[set(0xbad, 0), revert(0, 1)]);

    let mut program = caller(call, &[], 0);
    program.pop();
    program.extend([
        returndata_size(20),
        set(2, 31),
        returndata_copy(30, 31, 21),
        ret(19, 4),
    ]);
    let caller = test_context.deploy(&program);

    let result = test_context
        .call(&caller, vec![Fr::from(callee)])
        .expect("failed to call");

    assert_eq!(result.return_data(), fr(&[0, 1, 0xbad, 0]).as_slice());
}

#[test]
fn return_data_is_empty_before_any_call() {
    let result = TestBuilder::new(2322u64)
        .execute(
            &[set(7, 0), returndata_size(0), set(2, 2), returndata_copy(1, 2, 3), ret(0, 5)],
            vec![],
        )
        .expect("failed to execute");

    assert_eq!(result.return_data(), fr(&[0, 0, 2, 0, 0]).as_slice());
}

#[test]
fn failed_call_replaces_the_previous_return_data() {
    let mut test_context = TestBuilder::new(2322u64);

    let callee = test_context.deploy(&adder());
    let missing = test_context.random_address();

    let program = [
        calldata_copy(0, 2, 1),
        set(GAS_FORWARDED, 0),
        set(0, 3),
        call(0, 1, 10, 3, 20, 0, 19),
        returndata_size(30),
        call(0, 2, 10, 3, 20, 0, 19),
        returndata_size(31),
        ret(30, 2),
    ];
    let caller = test_context.deploy(&program);

    let result = test_context
        .call(&caller, vec![Fr::from(callee), Fr::from(missing)])
        .expect("failed to call");

    assert_eq!(result.return_data(), fr(&[1, 0]).as_slice());
}
