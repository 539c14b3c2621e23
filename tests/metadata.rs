use aztec_avm::instruction::*;
use aztec_avm::prelude::*;

use rstest::rstest;

fn read_variable(test_context: &mut TestBuilder, var: EnvironmentVariable) -> Fr {
    let result = test_context
        .execute(&[get_env_var(var as u32, 0), ret(0, 1)], vec![])
        .expect("failed to execute");

    assert!(!result.reverted());

    result.return_data()[0].clone()
}

#[rstest]
#[case(EnvironmentVariable::TransactionFee, 77)]
#[case(EnvironmentVariable::ChainId, 1)]
#[case(EnvironmentVariable::Version, 2)]
#[case(EnvironmentVariable::BlockNumber, 3)]
#[case(EnvironmentVariable::Timestamp, 4)]
#[case(EnvironmentVariable::IsStaticCall, 0)]
#[case(EnvironmentVariable::CallDepth, 0)]
fn globals_are_readable(#[case] var: EnvironmentVariable, #[case] expected: u64) {
    let mut test_context = TestBuilder::new(2322u64);

    test_context
        .transaction_fee(Fr::from(77u64))
        .globals(GlobalVariables {
            chain_id: Fr::from(1u64),
            version: Fr::from(2u64),
            block_number: Fr::from(3u64),
            timestamp: Fr::from(4u64),
        });

    assert_eq!(read_variable(&mut test_context, var), Fr::from(expected));
}

#[test]
fn addresses_are_readable() {
    let mut test_context = TestBuilder::new(2322u64);
    let sender = test_context.random_address();

    test_context.sender(sender.clone());

    let program = [get_env_var(EnvironmentVariable::Address as u32, 0), ret(0, 1)];
    let address = test_context.deploy(&program);

    let result = test_context.call(&address, vec![]).expect("failed to call");

    assert_eq!(result.return_data(), &[Fr::from(address)]);
    assert_eq!(
        read_variable(&mut test_context, EnvironmentVariable::Sender),
        Fr::from(sender)
    );
}

#[test]
fn static_flag_is_readable() {
    let mut test_context = TestBuilder::new(2322u64);

    test_context.static_call(true);

    assert_eq!(
        read_variable(&mut test_context, EnvironmentVariable::IsStaticCall),
        Fr::one()
    );
}

#[test]
fn unknown_variable_reverts() {
    let result = TestBuilder::new(2322u64)
        .execute(&[get_env_var(0x09, 0)], vec![])
        .expect("failed to execute");

    assert_eq!(result.revert_reason(), Some(RevertReason::InvalidEnvironmentVariable));
}
