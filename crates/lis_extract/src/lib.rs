pub mod feed;
pub mod post;
pub mod time;

pub use feed::collect_posts;
pub use post::extract_post;
pub use time::normalize;

pub mod prelude {
    pub use super::{collect_posts, extract_post, normalize};
    pub use lis_core::{PostRecord, PostType};
}
