use crate::{cli::connect, error, info, success};

/// Acquires a credential from the token broker and reports it masked.
pub async fn token(force: bool) {
    let ingester = match connect::ingester() {
        Ok(i) => i,
        Err(e) => error!("{}", e),
    };

    info!("Requesting token from {}", ingester.tokens().source().url());
    match ingester.tokens().get_token(force).await {
        Ok(credential) => success!(
            "Token {} obtained at {}",
            credential.masked(),
            credential.obtained_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        Err(e) => error!("{}", e),
    }
}
