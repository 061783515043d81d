use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// `(https://stackoverflowteams.com/c/<team>/images/s/<uuid>.<ext>)` as found in post markdown.
static TEAMS_IMAGE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\(https://stackoverflowteams\.com/c/[^/()\s]+/images/s/([0-9A-Fa-f-]+)\.([A-Za-z0-9]+)\)",
    )
    .expect("valid image link pattern")
});

/// Points hosted image links at the copies committed to the target repository.
///
/// The UUID loses its hyphens, matching how the exported image files are named.
#[derive(Debug, Clone)]
pub struct ImageLinkRewriter {
    prefix: String,
}

impl ImageLinkRewriter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn rewrite<'a>(&self, body: &'a str) -> Cow<'a, str> {
        TEAMS_IMAGE_LINK.replace_all(body, |caps: &Captures| {
            format!(
                "({}{}.{}?raw=true)",
                self.prefix,
                caps[1].replace('-', ""),
                &caps[2]
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewriter() -> ImageLinkRewriter {
        ImageLinkRewriter::new("../blob/main/images/")
    }

    #[test]
    fn rewrites_teams_image_link() {
        let input = "(https://stackoverflowteams.com/c/org/images/s/8505b790-b95e-44e9-b937-884d990f53c4.png)";
        assert_eq!(
            rewriter().rewrite(input),
            "(../blob/main/images/8505b790b95e44e9b937884d990f53c4.png?raw=true)"
        );
    }

    #[test]
    fn rewrites_every_link_inside_markdown() {
        let input = "See ![a](https://stackoverflowteams.com/c/acme/images/s/aa-bb.jpg) and \
                     ![b](https://stackoverflowteams.com/c/acme/images/s/cc-dd.gif).";
        assert_eq!(
            rewriter().rewrite(input),
            "See ![a](../blob/main/images/aabb.jpg?raw=true) and \
             ![b](../blob/main/images/ccdd.gif?raw=true)."
        );
    }

    #[test]
    fn leaves_other_links_untouched() {
        let input = "[docs](https://example.com/images/s/8505b790.png) plain text";
        assert!(matches!(rewriter().rewrite(input), Cow::Borrowed(_)));
    }
}
