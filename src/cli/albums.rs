use tabled::Table;

use crate::{cli::connect, error, info, success, utils, warning};

/// Imports a playlist once and prints its deduplicated album list.
pub async fn albums(playlist_url: String) {
    let ingester = match connect::ingester() {
        Ok(i) => i,
        Err(e) => error!("{}", e),
    };

    let pb = utils::spinner("Fetching playlist...");
    let result = ingester.ingest(&playlist_url).await;
    pb.finish_and_clear();

    match result {
        Ok(albums) if albums.is_empty() => warning!("Playlist has no albums"),
        Ok(albums) => {
            success!("Found {} unique albums", albums.len());
            let table = Table::new(utils::album_rows(&albums, None));
            println!("{}", table);
            info!("Arrange them with: albumwall wall {}", playlist_url);
        }
        Err(e) => error!("{}", e),
    }
}
