use param_server::{ServerError, Variant};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    param_server::serve(Variant::Form).await
}
