use alloy::{
    primitives::{Address, I256, U256, address},
    providers::{ProviderBuilder, mock::Asserter},
    sol_types::SolCall,
};
use copywallet_ops::{
    abi::copy_wallet::ICopyWallet,
    command::{Command, CommandBatch, CommandCode, OrderKind, PlaceOrder},
    error::ProviderError,
    wallet::CopyWallet,
};

const WALLET: Address = address!("0x81f6db11736589eab14b59c5251c27482e6c7c12");

fn sample_commands() -> Vec<Command> {
    vec![
        Command::OwnerModifyCollateral {
            amount: I256::try_from(-250_000000i64).unwrap(),
        },
        Command::PerpModifyCollateral {
            index: U256::from(29),
            amount: U256::from(20_000000u64),
            increase: false,
        },
        Command::PerpPlaceOrder(PlaceOrder {
            source: WALLET,
            source_index: U256::from(10),
            pair_index: U256::from(1),
            is_long: true,
            collateral: U256::from(100_000000u64),
            leverage: U256::from(30000u64),
            price: U256::from(3_550_580_000_000_000_000_000u128),
            take_profit: U256::ZERO,
            stop_loss: U256::ZERO,
            kind: OrderKind::Increase,
        }),
        Command::PerpCloseOrder {
            source: WALLET,
            index: U256::from(2),
        },
        Command::PerpUpdateSltp {
            index: U256::from(28),
            take_profit: U256::from(4_000_250_000_000_000_000_000u128),
            stop_loss: U256::from(3_000_250_000_000_000_000_000u128),
        },
    ]
}

/// Encoding then decoding against the same code yields the original
/// arguments exactly, for every command kind.
#[test]
fn test_command_round_trip_every_kind() {
    for command in sample_commands() {
        let payload = command.encode();
        let decoded = Command::decode(command.code(), &payload).unwrap();
        assert_eq!(decoded, command);
    }
}

/// One logical place-order operation yields exactly one (code, payload)
/// pair whose payload decodes back to the same tuple.
#[test]
fn test_place_order_single_pair() {
    let order = PlaceOrder {
        source: WALLET,
        source_index: U256::from(10),
        pair_index: U256::from(1),
        is_long: true,
        collateral: U256::from(100_000000u64), // 100 USDC at 6 decimals
        leverage: U256::from(30000u64),
        price: U256::from(3_550_580_000_000_000_000_000u128),
        take_profit: U256::ZERO,
        stop_loss: U256::ZERO,
        kind: OrderKind::Increase,
    };
    let batch = CommandBatch::new().with(Command::PerpPlaceOrder(order));

    let (codes, payloads) = batch.encode();
    assert_eq!(codes.len(), 1);
    assert_eq!(payloads.len(), 1);
    assert_eq!(codes[0], u8::from(CommandCode::PerpPlaceOrder));
    assert_eq!(
        Command::decode(CommandCode::PerpPlaceOrder, &payloads[0]).unwrap(),
        Command::PerpPlaceOrder(order)
    );
}

/// The produced `execute` calldata carries the two parallel lists with the
/// batch's exact length and order.
#[test]
fn test_execute_calldata_parallel_lists() {
    let provider = ProviderBuilder::new().connect_mocked_client(Asserter::new());
    let wallet = CopyWallet::new(WALLET, provider);

    let commands = sample_commands();
    let batch: CommandBatch = commands.iter().copied().collect();
    let calldata = wallet.calldata(&batch).unwrap();

    let decoded = ICopyWallet::executeCall::abi_decode(&calldata).unwrap();
    assert_eq!(decoded.commands.len(), commands.len());
    assert_eq!(decoded.payloads.len(), commands.len());
    for (i, command) in commands.iter().enumerate() {
        assert_eq!(decoded.commands[i], u8::from(command.code()));
        let round_tripped = Command::decode(
            CommandCode::try_from(decoded.commands[i]).unwrap(),
            &decoded.payloads[i],
        )
        .unwrap();
        assert_eq!(round_tripped, *command);
    }
}

/// A deposit-then-allocate batch keeps the supplied command order so the
/// allocation can spend the deposit made earlier in the same transaction.
#[test]
fn test_same_batch_ordering() {
    let provider = ProviderBuilder::new().connect_mocked_client(Asserter::new());
    let wallet = CopyWallet::new(WALLET, provider);

    let deposit = Command::OwnerModifyCollateral {
        amount: I256::try_from(100_000000i64).unwrap(),
    };
    let allocate = Command::PerpModifyCollateral {
        index: U256::from(7),
        amount: U256::from(100_000000u64),
        increase: true,
    };
    let calldata = wallet
        .calldata(&CommandBatch::new().with(deposit).with(allocate))
        .unwrap();

    let decoded = ICopyWallet::executeCall::abi_decode(&calldata).unwrap();
    assert_eq!(
        decoded.commands,
        vec![
            u8::from(CommandCode::OwnerModifyCollateral),
            u8::from(CommandCode::PerpModifyCollateral),
        ]
    );
    assert_eq!(
        Command::decode(CommandCode::OwnerModifyCollateral, &decoded.payloads[0]).unwrap(),
        deposit
    );
    assert_eq!(
        Command::decode(CommandCode::PerpModifyCollateral, &decoded.payloads[1]).unwrap(),
        allocate
    );
}

/// An empty batch is rejected locally; nothing is submitted.
#[tokio::test]
async fn test_empty_batch_rejected() {
    // Nothing is pushed to the asserter: any network interaction would
    // surface as a transport error instead of the local rejection
    let provider = ProviderBuilder::new().connect_mocked_client(Asserter::new());
    let wallet = CopyWallet::new(WALLET, provider);

    let batch = CommandBatch::new();
    assert!(matches!(
        wallet.calldata(&batch),
        Err(ProviderError::EmptyBatch)
    ));
    assert!(matches!(
        wallet.execute(&batch).await,
        Err(ProviderError::EmptyBatch)
    ));
}

/// Decoding a payload against the wrong schema is a local error.
#[test]
fn test_cross_schema_decode_fails() {
    let payload = Command::PerpCloseOrder {
        source: WALLET,
        index: U256::from(2),
    }
    .encode();
    assert!(Command::decode(CommandCode::PerpUpdateSltp, &payload).is_err());
}
