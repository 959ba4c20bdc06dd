use alloy_provider::DynProvider;

mod erc725y {
    alloy_sol_macro::sol!(
        #[allow(missing_docs)]
        #[sol(rpc)]
        #[derive(Debug)]
        interface IERC725Y {
            function getData(bytes32 dataKey) external view returns (bytes memory dataValue);
            function getDataBatch(bytes32[] memory dataKeys) external view returns (bytes[] memory dataValues);
            function setData(bytes32 dataKey, bytes memory dataValue) external payable;
            function setDataBatch(bytes32[] memory dataKeys, bytes[] memory dataValues) external payable;
        }
    );
}

pub use erc725y::IERC725Y;

pub type IERC725YInstanceT = IERC725Y::IERC725YInstance<DynProvider>;

#[cfg(test)]
mod test {
    use alloy_primitives::{b256, Bytes, FixedBytes};
    use alloy_sol_types::{SolCall, SolValue};

    use super::IERC725Y;

    #[test]
    fn selectors_make_up_the_erc725y_interface_id() {
        let interface_id = [
            IERC725Y::getDataCall::SELECTOR,
            IERC725Y::setDataCall::SELECTOR,
            IERC725Y::getDataBatchCall::SELECTOR,
            IERC725Y::setDataBatchCall::SELECTOR,
        ]
        .into_iter()
        .fold([0u8; 4], |acc, selector| {
            std::array::from_fn(|i| acc[i] ^ selector[i])
        });

        assert_eq!(FixedBytes(interface_id), FixedBytes([0x62, 0x9a, 0xa6, 0x94]));
        assert_eq!(IERC725Y::setDataBatchCall::SELECTOR, [0x97, 0x90, 0x24, 0x21]);
    }

    #[test]
    fn get_data_batch_returns_are_positional() {
        let values = vec![Bytes::from(vec![1u8, 2]), Bytes::new(), Bytes::from(vec![3u8])];
        let encoded = (values.clone(),).abi_encode_params();

        let decoded = IERC725Y::getDataBatchCall::abi_decode_returns(&encoded).unwrap();
        assert_eq!(decoded, values);

        let call = IERC725Y::getDataBatchCall {
            dataKeys: vec![b256!(
                "0x0cfc51aec37c55a4d0b1a65c6255c4bf2fbdf6277f3cc0730c45b828b6db8b47"
            )],
        };
        assert_eq!(&call.abi_encode()[..4], IERC725Y::getDataBatchCall::SELECTOR.as_slice());
    }
}
