pub mod copy_wallet {
    alloy::sol!(
        /// Copy-trading wallet contract.
        ///
        /// `execute` is the sole mutation entry point: parallel lists of
        /// command codes and ABI-encoded payloads, applied in order within
        /// a single transaction.
        #[derive(Debug)]
        #[sol(rpc)]
        interface ICopyWallet {
            function execute(uint8[] calldata commands, bytes[] calldata payloads) external payable;

            function hasCloseCharged(uint256 index) external view returns (bool charged);

            function chargeCloseFee(uint256 index) external;

            function availableFund() external view returns (uint256 amount);

            function owner() external view returns (address);
        }
    );
}

pub mod configs {
    alloy::sol!(
        /// Deployment-wide configuration contract: executor registry and
        /// ownership.
        #[derive(Debug)]
        #[sol(rpc)]
        interface IConfigs {
            function addExecutor(address executor) external;

            function removeExecutor(address executor) external;

            function transferOwnership(address newOwner) external;

            function owner() external view returns (address);
        }
    );
}

pub mod erc20 {
    alloy::sol!(
        /// Minimal ERC-20 surface used to fund wallets.
        #[derive(Debug)]
        #[sol(rpc)]
        interface IERC20 {
            function approve(address spender, uint256 amount) external returns (bool);

            function allowance(address owner, address spender) external view returns (uint256);

            function balanceOf(address account) external view returns (uint256);
        }
    );
}

pub mod multicall {
    alloy::sol!(
        /// Multicall3 aggregator, `aggregate` flavor only: executes every
        /// sub-call and reverts the whole batch if any sub-call reverts.
        #[derive(Debug)]
        #[sol(rpc)]
        interface IMulticall3 {
            struct Call {
                address target;
                bytes callData;
            }

            function aggregate(Call[] calldata calls)
                external
                payable
                returns (uint256 blockNumber, bytes[] memory returnData);
        }
    );
}

pub mod errors {
    alloy::sol!(
        /// Known copy-wallet revert errors, used to decode revert reasons.
        #[derive(Debug)]
        interface CopyWalletErrors {
            error Unauthorized(address caller);

            error InvalidCommand(uint8 code);

            error CommandFailed(uint256 index);

            error InsufficientAvailableFund(uint256 requested, uint256 available);

            error CloseFeeAlreadyCharged(uint256 index);
        }
    );
}
