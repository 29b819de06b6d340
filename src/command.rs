use alloy::{
    primitives::{Address, Bytes, I256, U256},
    sol_types::SolValue,
};

/// Command code understood by the wallet contract's `execute` entry point.
///
/// The on-chain set is open: new wallet revisions add codes. This enumeration
/// pins the codes of the wallet revision this crate targets; payloads carrying
/// any other code are rejected at decode time rather than guessed at.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandCode {
    OwnerModifyCollateral = 0,
    PerpModifyCollateral = 1,
    PerpPlaceOrder = 2,
    PerpCloseOrder = 3,
    PerpUpdateSltp = 4,
}

impl From<CommandCode> for u8 {
    fn from(value: CommandCode) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for CommandCode {
    type Error = CommandError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CommandCode::OwnerModifyCollateral),
            1 => Ok(CommandCode::PerpModifyCollateral),
            2 => Ok(CommandCode::PerpPlaceOrder),
            3 => Ok(CommandCode::PerpCloseOrder),
            4 => Ok(CommandCode::PerpUpdateSltp),
            other => Err(CommandError::UnknownCode(other)),
        }
    }
}

/// Local command encoding/decoding failure. Raised synchronously, before any
/// network interaction; nothing gets submitted on this error.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command code: {0}")]
    UnknownCode(u8),

    #[error("malformed payload for {code:?}: {source}")]
    MalformedPayload {
        code: CommandCode,
        source: alloy::sol_types::Error,
    },

    #[error("invalid {field} value in payload for {code:?}")]
    InvalidField {
        code: CommandCode,
        field: &'static str,
    },
}

/// Direction of a place-order command.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderKind {
    Increase = 0,
    Decrease = 1,
}

/// Arguments of [`Command::PerpPlaceOrder`].
///
/// Collateral is denominated in the chain's collateral token units; price,
/// take-profit and stop-loss are 18-decimal fixed point. Leverage is passed
/// through in raw contract units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaceOrder {
    /// Source trader the wallet copies.
    pub source: Address,
    /// Index of the copied position on the source side.
    pub source_index: U256,
    /// Trading pair index on the underlying perpetuals protocol.
    pub pair_index: U256,
    pub is_long: bool,
    pub collateral: U256,
    pub leverage: U256,
    pub price: U256,
    pub take_profit: U256,
    pub stop_loss: U256,
    pub kind: OrderKind,
}

/// One wallet operation with its typed arguments.
///
/// * [`Command::OwnerModifyCollateral`] moves funds between the wallet owner's
///   deposit and the wallet's available balance; the signed amount makes it
///   both the deposit and the withdrawal operation.
/// * [`Command::PerpModifyCollateral`] adds collateral to or removes it from
///   the position at `index`.
/// * [`Command::PerpPlaceOrder`] opens or adjusts a position copied from a
///   source trader, see [`PlaceOrder`].
/// * [`Command::PerpCloseOrder`] closes the position at `index` copied from
///   `source`.
/// * [`Command::PerpUpdateSltp`] replaces the stop-loss/take-profit levels of
///   the position at `index`; a zero level clears it.
///
/// Each variant maps one-to-one to a fixed ABI payload schema; encoding then
/// decoding against the same code yields the original arguments exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    OwnerModifyCollateral {
        amount: I256,
    },
    PerpModifyCollateral {
        index: U256,
        amount: U256,
        increase: bool,
    },
    PerpPlaceOrder(PlaceOrder),
    PerpCloseOrder {
        source: Address,
        index: U256,
    },
    PerpUpdateSltp {
        index: U256,
        take_profit: U256,
        stop_loss: U256,
    },
}

impl Command {
    pub fn code(&self) -> CommandCode {
        match self {
            Command::OwnerModifyCollateral { .. } => CommandCode::OwnerModifyCollateral,
            Command::PerpModifyCollateral { .. } => CommandCode::PerpModifyCollateral,
            Command::PerpPlaceOrder(_) => CommandCode::PerpPlaceOrder,
            Command::PerpCloseOrder { .. } => CommandCode::PerpCloseOrder,
            Command::PerpUpdateSltp { .. } => CommandCode::PerpUpdateSltp,
        }
    }

    /// ABI-encodes the command arguments into the payload the wallet contract
    /// decodes for this command's code.
    pub fn encode(&self) -> Bytes {
        match self {
            Command::OwnerModifyCollateral { amount } => amount.abi_encode().into(),
            Command::PerpModifyCollateral {
                index,
                amount,
                increase,
            } => (*index, *amount, *increase).abi_encode_params().into(),
            Command::PerpPlaceOrder(order) => (
                order.source,
                order.source_index,
                order.pair_index,
                order.is_long,
                order.collateral,
                order.leverage,
                order.price,
                order.take_profit,
                order.stop_loss,
                U256::from(order.kind as u8),
            )
                .abi_encode_params()
                .into(),
            Command::PerpCloseOrder { source, index } => {
                (*source, *index).abi_encode_params().into()
            }
            Command::PerpUpdateSltp {
                index,
                take_profit,
                stop_loss,
            } => (*index, *take_profit, *stop_loss).abi_encode_params().into(),
        }
    }

    /// Decodes a payload against the schema of `code`.
    pub fn decode(code: CommandCode, payload: &[u8]) -> Result<Self, CommandError> {
        let malformed = |source| CommandError::MalformedPayload { code, source };
        match code {
            CommandCode::OwnerModifyCollateral => {
                let amount = I256::abi_decode(payload).map_err(malformed)?;
                Ok(Command::OwnerModifyCollateral { amount })
            }
            CommandCode::PerpModifyCollateral => {
                let (index, amount, increase) =
                    <(U256, U256, bool)>::abi_decode_params(payload).map_err(malformed)?;
                Ok(Command::PerpModifyCollateral {
                    index,
                    amount,
                    increase,
                })
            }
            CommandCode::PerpPlaceOrder => {
                let (
                    source,
                    source_index,
                    pair_index,
                    is_long,
                    collateral,
                    leverage,
                    price,
                    take_profit,
                    stop_loss,
                    kind,
                ) = <(
                    Address,
                    U256,
                    U256,
                    bool,
                    U256,
                    U256,
                    U256,
                    U256,
                    U256,
                    U256,
                )>::abi_decode_params(payload)
                .map_err(malformed)?;
                let kind = if kind == U256::ZERO {
                    OrderKind::Increase
                } else if kind == U256::ONE {
                    OrderKind::Decrease
                } else {
                    return Err(CommandError::InvalidField {
                        code,
                        field: "kind",
                    });
                };
                Ok(Command::PerpPlaceOrder(PlaceOrder {
                    source,
                    source_index,
                    pair_index,
                    is_long,
                    collateral,
                    leverage,
                    price,
                    take_profit,
                    stop_loss,
                    kind,
                }))
            }
            CommandCode::PerpCloseOrder => {
                let (source, index) =
                    <(Address, U256)>::abi_decode_params(payload).map_err(malformed)?;
                Ok(Command::PerpCloseOrder { source, index })
            }
            CommandCode::PerpUpdateSltp => {
                let (index, take_profit, stop_loss) =
                    <(U256, U256, U256)>::abi_decode_params(payload).map_err(malformed)?;
                Ok(Command::PerpUpdateSltp {
                    index,
                    take_profit,
                    stop_loss,
                })
            }
        }
    }
}

/// Ordered list of commands submitted together as one transaction.
///
/// The wallet contract executes the commands in the supplied order and the
/// whole batch succeeds or the whole transaction reverts; a later command may
/// rely on state produced by an earlier one.
#[derive(Clone, Debug, Default)]
pub struct CommandBatch {
    commands: Vec<Command>,
}

impl CommandBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Encodes into the parallel lists the `execute` entry point takes.
    /// Both lists have the batch's length and order.
    pub fn encode(&self) -> (Vec<u8>, Vec<Bytes>) {
        self.commands
            .iter()
            .map(|cmd| (u8::from(cmd.code()), cmd.encode()))
            .unzip()
    }
}

impl FromIterator<Command> for CommandBatch {
    fn from_iter<T: IntoIterator<Item = Command>>(iter: T) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_mapping_is_closed() {
        for code in [
            CommandCode::OwnerModifyCollateral,
            CommandCode::PerpModifyCollateral,
            CommandCode::PerpPlaceOrder,
            CommandCode::PerpCloseOrder,
            CommandCode::PerpUpdateSltp,
        ] {
            assert_eq!(CommandCode::try_from(u8::from(code)).unwrap(), code);
        }
        assert!(matches!(
            CommandCode::try_from(5),
            Err(CommandError::UnknownCode(5))
        ));
        assert!(matches!(
            CommandCode::try_from(255),
            Err(CommandError::UnknownCode(255))
        ));
    }

    #[test]
    fn test_malformed_payload_is_local_error() {
        // Truncated close-order payload: right schema, wrong arity
        let payload = U256::from(2).abi_encode();
        assert!(matches!(
            Command::decode(CommandCode::PerpCloseOrder, &payload),
            Err(CommandError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn test_place_order_rejects_unknown_kind() {
        let mut order = PlaceOrder {
            source: Address::ZERO,
            source_index: U256::ZERO,
            pair_index: U256::from(1),
            is_long: true,
            collateral: U256::from(100_000000u64),
            leverage: U256::from(30000u64),
            price: U256::ZERO,
            take_profit: U256::ZERO,
            stop_loss: U256::ZERO,
            kind: OrderKind::Increase,
        };
        let encoded = Command::PerpPlaceOrder(order).encode();
        // Patch the last word to an out-of-range kind
        let mut raw = encoded.to_vec();
        let last = raw.len() - 32;
        raw[last..].copy_from_slice(&U256::from(7).to_be_bytes::<32>());
        assert!(matches!(
            Command::decode(CommandCode::PerpPlaceOrder, &raw),
            Err(CommandError::InvalidField { field: "kind", .. })
        ));

        order.kind = OrderKind::Decrease;
        let decoded =
            Command::decode(CommandCode::PerpPlaceOrder, &Command::PerpPlaceOrder(order).encode())
                .unwrap();
        assert_eq!(decoded, Command::PerpPlaceOrder(order));
    }

    #[test]
    fn test_batch_preserves_order_and_arity() {
        let batch = CommandBatch::new()
            .with(Command::OwnerModifyCollateral {
                amount: I256::try_from(100_000000i64).unwrap(),
            })
            .with(Command::PerpModifyCollateral {
                index: U256::from(29),
                amount: U256::from(100_000000u64),
                increase: true,
            });
        let (codes, payloads) = batch.encode();
        assert_eq!(codes.len(), payloads.len());
        assert_eq!(codes, vec![0, 1]);
        for (code, payload) in codes.iter().zip(&payloads) {
            let cmd = Command::decode(CommandCode::try_from(*code).unwrap(), payload).unwrap();
            assert_eq!(u8::from(cmd.code()), *code);
        }
    }
}
