//! Random post generation for fixtures and demos.
//!
//! Seeded generation is reproducible: the same seed always yields the same
//! titles, bodies and author names (ids and timestamps are still assigned by
//! the store).

use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::{FirstName, LastName};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use blog_core::domain::{Author, BlogPost, PostFields};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

/// Generate one post with random words and a random author.
pub fn fake_post<R: Rng + ?Sized>(rng: &mut R) -> PostFields {
    let title: String = Sentence(3..8).fake_with_rng(rng);
    let content: String = Paragraph(2..6).fake_with_rng(rng);
    let first_name: String = FirstName().fake_with_rng(rng);
    let last_name: String = LastName().fake_with_rng(rng);

    PostFields::new(title, content, Author::new(first_name, last_name))
}

/// Generate `count` posts from the thread RNG.
pub fn fake_posts(count: usize) -> Vec<PostFields> {
    let mut rng = rand::rng();
    (0..count).map(|_| fake_post(&mut rng)).collect()
}

/// Generate `count` posts deterministically from `seed`.
pub fn fake_posts_seeded(count: usize, seed: u64) -> Vec<PostFields> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| fake_post(&mut rng)).collect()
}

/// Insert `count` random posts into `repo`.
pub async fn seed_posts(
    repo: &dyn PostRepository,
    count: usize,
) -> Result<Vec<BlogPost>, RepoError> {
    let posts = repo.insert_many(fake_posts(count)).await?;
    tracing::info!(count = posts.len(), "Seeded blog posts");
    Ok(posts)
}
