//! ABI binding for the deployed `SchemaRegistry` contract.

alloy::sol! {
    #[sol(rpc)]
    #[derive(Debug)]
    contract SchemaRegistry {
        error OwnableUnauthorizedAccount(address account);
        error OwnableInvalidOwner(address owner);

        function createSchema(string schemaId, string json) external;
        function adminCreateSchema(address account, string schemaId, string json) external;
        function schemas(address account, string schemaId) external view returns (string);
        function owner() external view returns (address);
        function transferOwnership(address newOwner) external;
    }
}
