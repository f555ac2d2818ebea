use gifstream_core::Gif;

use crate::api::{RedditListingChild, RedditMedia, RedditPostData};

/// Thumbnail values Reddit uses as placeholders instead of a real URL.
const PLACEHOLDER_THUMBNAILS: [&str; 3] = ["default", "none", "nsfw"];

/// Pick the playable source for a post, or `None` when the post has no
/// usable media. Check order is fixed: a direct `.mp4` URL, then `.gifv`
/// and `.webm` rewrites, then the secure, primary, and preview video
/// descriptors. Unusable posts are a normal outcome, not an error.
pub fn best_src_for_post(post: &RedditPostData) -> Option<String> {
    if post.url.contains(".mp4") {
        return Some(post.url.clone());
    }

    if post.url.contains(".gifv") {
        return Some(post.url.replacen(".gifv", ".mp4", 1));
    }

    if post.url.contains(".webm") {
        return Some(post.url.replacen(".webm", ".mp4", 1));
    }

    if let Some(fallback) = video_fallback(post.secure_media.as_ref()) {
        return Some(fallback);
    }

    if let Some(fallback) = video_fallback(post.media.as_ref()) {
        return Some(fallback);
    }

    if let Some(preview) = post.preview.as_ref() {
        if let Some(video) = preview.reddit_video_preview.as_ref() {
            if let Some(fallback) = video.fallback_url.as_ref() {
                return Some(fallback.clone());
            }
        }
    }

    None
}

fn video_fallback(media: Option<&RedditMedia>) -> Option<String> {
    media?.reddit_video.as_ref()?.fallback_url.clone()
}

/// Placeholder thumbnails map to bundled assets; real URLs pass through.
pub fn normalize_thumbnail(thumbnail: &str) -> String {
    if PLACEHOLDER_THUMBNAILS.contains(&thumbnail) {
        format!("/assets/{}.png", thumbnail)
    } else {
        thumbnail.to_string()
    }
}

/// Map raw listing children to playable items, preserving listing order.
pub fn posts_to_gifs(children: &[RedditListingChild<RedditPostData>]) -> Vec<Gif> {
    children
        .iter()
        .filter_map(|child| {
            let post = &child.data;
            let src = best_src_for_post(post)?;
            Some(Gif {
                name: post.name.clone(),
                src,
                thumbnail: normalize_thumbnail(&post.thumbnail),
                title: post.title.clone(),
                author: post.author.clone(),
                permalink: post.permalink.clone(),
                comments: post.num_comments,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RedditPreview, RedditVideo};

    fn post(url: &str) -> RedditPostData {
        RedditPostData {
            name: "t3_abc".to_string(),
            title: "A looping clip".to_string(),
            author: "clipmaker".to_string(),
            permalink: "/r/gifs/comments/abc/".to_string(),
            url: url.to_string(),
            thumbnail: "https://thumbs.example/abc.jpg".to_string(),
            num_comments: 3,
            media: None,
            secure_media: None,
            preview: None,
        }
    }

    fn video(fallback: &str) -> RedditMedia {
        RedditMedia {
            reddit_video: Some(RedditVideo {
                fallback_url: Some(fallback.to_string()),
            }),
        }
    }

    #[test]
    fn test_mp4_urls_pass_through() {
        let p = post("https://i.example/clip.mp4");
        assert_eq!(
            best_src_for_post(&p),
            Some("https://i.example/clip.mp4".to_string())
        );
    }

    #[test]
    fn test_gifv_rewrites_first_occurrence_only() {
        let p = post("https://i.example/clip.gifv?fmt=.gifv");
        assert_eq!(
            best_src_for_post(&p),
            Some("https://i.example/clip.mp4?fmt=.gifv".to_string())
        );
    }

    #[test]
    fn test_webm_rewrites_to_mp4() {
        let p = post("https://i.example/clip.webm");
        assert_eq!(
            best_src_for_post(&p),
            Some("https://i.example/clip.mp4".to_string())
        );
    }

    #[test]
    fn test_direct_url_wins_over_descriptors() {
        let mut p = post("https://i.example/clip.mp4");
        p.secure_media = Some(video("https://v.example/secure.mp4"));
        assert_eq!(
            best_src_for_post(&p),
            Some("https://i.example/clip.mp4".to_string())
        );
    }

    #[test]
    fn test_secure_media_wins_over_media_and_preview() {
        let mut p = post("https://example.com/post");
        p.secure_media = Some(video("https://v.example/secure.mp4"));
        p.media = Some(video("https://v.example/primary.mp4"));
        p.preview = Some(RedditPreview {
            reddit_video_preview: Some(RedditVideo {
                fallback_url: Some("https://v.example/preview.mp4".to_string()),
            }),
        });
        assert_eq!(
            best_src_for_post(&p),
            Some("https://v.example/secure.mp4".to_string())
        );
    }

    #[test]
    fn test_media_wins_over_preview() {
        let mut p = post("https://example.com/post");
        p.media = Some(video("https://v.example/primary.mp4"));
        p.preview = Some(RedditPreview {
            reddit_video_preview: Some(RedditVideo {
                fallback_url: Some("https://v.example/preview.mp4".to_string()),
            }),
        });
        assert_eq!(
            best_src_for_post(&p),
            Some("https://v.example/primary.mp4".to_string())
        );
    }

    #[test]
    fn test_preview_fallback_is_last_resort() {
        let mut p = post("https://example.com/post");
        p.preview = Some(RedditPreview {
            reddit_video_preview: Some(RedditVideo {
                fallback_url: Some("https://v.example/preview.mp4".to_string()),
            }),
        });
        assert_eq!(
            best_src_for_post(&p),
            Some("https://v.example/preview.mp4".to_string())
        );
    }

    #[test]
    fn test_descriptor_without_fallback_is_unusable() {
        let mut p = post("https://example.com/post");
        p.media = Some(RedditMedia {
            reddit_video: Some(RedditVideo { fallback_url: None }),
        });
        assert_eq!(best_src_for_post(&p), None);
    }

    #[test]
    fn test_text_posts_are_dropped() {
        assert_eq!(best_src_for_post(&post("https://example.com/article")), None);
        assert_eq!(best_src_for_post(&post("")), None);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let p = post("https://i.example/clip.gifv");
        assert_eq!(best_src_for_post(&p), best_src_for_post(&p));
    }

    #[test]
    fn test_placeholder_thumbnails_map_to_assets() {
        assert_eq!(normalize_thumbnail("default"), "/assets/default.png");
        assert_eq!(normalize_thumbnail("none"), "/assets/none.png");
        assert_eq!(normalize_thumbnail("nsfw"), "/assets/nsfw.png");
    }

    #[test]
    fn test_real_thumbnails_pass_through() {
        assert_eq!(
            normalize_thumbnail("https://thumbs.example/abc.jpg"),
            "https://thumbs.example/abc.jpg"
        );
        // Case matters: only the exact placeholder strings are rewritten
        assert_eq!(normalize_thumbnail("Default"), "Default");
    }

    #[test]
    fn test_unusable_posts_are_filtered_and_order_kept() {
        let children: Vec<RedditListingChild<RedditPostData>> = [
            ("t3_a", "https://i.example/a.mp4"),
            ("t3_b", "https://example.com/article"),
            ("t3_c", "https://i.example/c.gifv"),
        ]
        .into_iter()
        .map(|(name, url)| {
            let mut data = post(url);
            data.name = name.to_string();
            RedditListingChild {
                kind: "t3".to_string(),
                data,
            }
        })
        .collect();

        let gifs = posts_to_gifs(&children);
        let names: Vec<&str> = gifs.iter().map(|gif| gif.name.as_str()).collect();
        assert_eq!(names, ["t3_a", "t3_c"]);
        assert!(gifs.iter().all(|gif| !gif.src.is_empty()));
    }
}
