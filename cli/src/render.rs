use forum_core::Post;

/// One line per post, in the order the server returned them.
pub fn post_list(posts: &[Post]) -> String {
    if posts.is_empty() {
        return "No posts yet.\n".to_string();
    }

    posts
        .iter()
        .map(|post| {
            format!(
                "[{:>3} votes] #{} {} (by {}, {})\n",
                post.votes,
                post.id,
                post.title,
                post.author,
                reply_count(post.replies.len()),
            )
        })
        .collect()
}

/// Full view of a single post and its replies.
pub fn post_detail(post: &Post) -> String {
    let mut out = format!(
        "#{} {}\nby {} | {} votes\n\n{}\n\n",
        post.id, post.title, post.author, post.votes, post.content,
    );

    if post.replies.is_empty() {
        out.push_str("No replies yet.\n");
    } else {
        out.push_str(&format!("Replies ({}):\n", post.replies.len()));
        for reply in &post.replies {
            out.push_str(&format!("  {}. {}\n", reply.id, reply.text));
        }
    }
    out
}

fn reply_count(n: usize) -> String {
    match n {
        1 => "1 reply".to_string(),
        n => format!("{n} replies"),
    }
}
