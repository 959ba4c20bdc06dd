use alloy_primitives::{Address, B256};
use serde::Serialize;
use tip_assistant::{
    constants::{lsp1_delegate_key, supported_transaction_types, Network},
    keys::{executive_config_key, type_config_key},
};

use crate::context::CliContext;

#[derive(Debug, Serialize)]
pub struct TypeKey {
    pub type_id: B256,
    pub key: B256,
}

#[derive(Debug, Serialize)]
pub struct Keys {
    pub network: Network,
    pub assistant: Address,
    pub type_configs: Vec<TypeKey>,
    pub executive_config: B256,
    pub universal_receiver_delegate: B256,
}

pub struct KeysArgs {
    pub assistant: Option<Address>,
}

impl Keys {
    pub fn run(ctx: &CliContext, KeysArgs { assistant }: KeysArgs) -> Self {
        let assistant = assistant.unwrap_or_else(|| ctx.assistant_address());

        let type_configs = supported_transaction_types()
            .into_iter()
            .map(|type_id| TypeKey {
                type_id,
                key: type_config_key(type_id),
            })
            .collect();

        Self {
            network: ctx.network(),
            assistant,
            type_configs,
            executive_config: executive_config_key(assistant),
            universal_receiver_delegate: lsp1_delegate_key(),
        }
    }
}

#[cfg(test)]
mod test {
    use alloy_primitives::b256;
    use tip_assistant::constants::LSP0_VALUE_RECEIVED;

    use super::*;
    use crate::config::Config;

    #[test]
    fn mainnet_keys() {
        let ctx = CliContext::new(Config {
            network: Network::Mainnet,
            ..Default::default()
        });

        let keys = Keys::run(&ctx, KeysArgs { assistant: None });

        assert_eq!(keys.assistant, Network::Mainnet.tip_assistant());
        assert_eq!(keys.type_configs.len(), 1);
        assert_eq!(keys.type_configs[0].type_id, LSP0_VALUE_RECEIVED);
        assert_eq!(
            keys.type_configs[0].key,
            b256!("0x007d1fb981483053919f00009c4705229491d365fb5434052e12a386d6771d97")
        );
        assert_eq!(
            keys.executive_config,
            b256!("0xa2fcaddaa89b3c5410fc00000c3dc7ea7521c79b99a667f2024d76714d33def2")
        );
    }
}
