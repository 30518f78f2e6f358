mod grid;
mod ingest;
mod token;
mod wall;

pub use grid::GridBounds;
pub use grid::GridPlacementStore;
pub use ingest::PlaylistIngester;
pub use ingest::dedup_albums;
pub use ingest::extract_playlist_id;
pub use token::TokenProvider;
pub use wall::WallSession;
