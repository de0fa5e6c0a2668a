//! Interpretation of declared license URLs into repository coordinates.
//!
//! Package manifests rarely declare a machine-readable license; far more
//! often they point at a license *file* in the project's repository.
//! This module extracts `(owner, repo, ref, path)` from the
//! loosely-structured URL shapes seen in the wild so the GitHub provider
//! can query the license-metadata API instead of scraping file contents.
//!
//! Recognized shapes:
//!
//! - `https://github.com/<owner>/<repo>/blob/<ref>/<path>`
//! - `https://github.com/<owner>/<repo>/raw/<ref>/<path>`
//! - `https://raw.githubusercontent.com/<owner>/<repo>/<ref>/<path>`
//! - `https://raw.github.com/<owner>/<repo>/<ref>/<path>`
//!
//! Anything else (other hosts, repository root links, paths that do not
//! name a license file) is "not a recognized repository URL", which the
//! calling provider reports as not-found rather than an error.

use url::Url;

/// Which family of host the URL pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoHost {
    /// The source host proper (`github.com`): path carries a
    /// `blob`/`raw` marker segment before the ref.
    GitHub,
    /// A raw-content host (`raw.githubusercontent.com`,
    /// `raw.github.com`): the ref follows the repo directly.
    RawContent,
}

/// Repository coordinates derived from a declared license URL.
///
/// Ephemeral: produced and consumed within a single resolution call,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub host: RepoHost,
    pub owner: String,
    pub repo: String,
    /// Branch (or tag) the URL referenced. Defaults to `"master"` when
    /// the URL does not encode one. A version tag in this position is
    /// not distinguished from a branch name; tag-scoped license
    /// lookups are unsupported.
    pub git_ref: String,
    /// Path of the license file within the repository.
    pub path: String,
}

/// Fallback ref when the URL does not encode a branch.
const DEFAULT_REF: &str = "master";

/// Parse a declared license URL into repository coordinates.
///
/// Returns `None` unless the URL matches one of the recognized host
/// shapes *and* its final path segment names a license file (see
/// [`is_license_file`]).
pub fn parse_license_url(raw: &str) -> Option<RepoRef> {
    let url = Url::parse(raw).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    let host = url.host_str()?;
    let segments: Vec<&str> = url
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .collect();

    let (repo_host, owner, repo, git_ref, path_segments) = match host {
        "github.com" => {
            let (owner, repo) = match segments.as_slice() {
                [owner, repo, ..] => (*owner, *repo),
                _ => return None,
            };
            match segments.get(2) {
                // .../<owner>/<repo>/blob/<ref>/<path> and the /raw/ twin.
                Some(&"blob") | Some(&"raw") => {
                    let git_ref = *segments.get(3)?;
                    (RepoHost::GitHub, owner, repo, git_ref, &segments[4..])
                }
                // .../<owner>/<repo>/<path>: no ref encoded, fall back
                // to the canonical default branch name.
                Some(_) => (RepoHost::GitHub, owner, repo, DEFAULT_REF, &segments[2..]),
                None => return None,
            }
        }
        "raw.githubusercontent.com" | "raw.github.com" => match segments.as_slice() {
            [owner, repo, git_ref, rest @ ..] => {
                (RepoHost::RawContent, *owner, *repo, *git_ref, rest)
            }
            _ => return None,
        },
        _ => return None,
    };

    if path_segments.is_empty() {
        return None;
    }
    let file_name = path_segments.last()?;
    if !is_license_file(file_name) {
        return None;
    }

    Some(RepoRef {
        host: repo_host,
        owner: owner.to_string(),
        repo: repo.to_string(),
        git_ref: git_ref.to_string(),
        path: path_segments.join("/"),
    })
}

/// Whether a file name looks like a license file.
///
/// Case-insensitive throughout. Accepts a bare `license`, the extensions
/// `.md`, `.txt`, `.bsd`, `.mit`, and hyphenated variant identifiers
/// such as `LICENSE-MIT`.
pub fn is_license_file(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    match lower.strip_prefix("license") {
        None => false,
        Some("") => true,
        Some(rest) => {
            matches!(rest, ".md" | ".txt" | ".bsd" | ".mit")
                || (rest.starts_with('-') && rest.len() > 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> RepoRef {
        parse_license_url(raw).expect("URL should be recognized")
    }

    #[test]
    fn blob_url_on_source_host() {
        let repo_ref = parse("https://github.com/org/pkg-a/blob/master/LICENSE");
        assert_eq!(repo_ref.host, RepoHost::GitHub);
        assert_eq!(repo_ref.owner, "org");
        assert_eq!(repo_ref.repo, "pkg-a");
        assert_eq!(repo_ref.git_ref, "master");
        assert_eq!(repo_ref.path, "LICENSE");
    }

    #[test]
    fn raw_url_on_source_host() {
        let repo_ref = parse("https://github.com/org/pkg-a/raw/master/LICENSE");
        assert_eq!(repo_ref.git_ref, "master");
        assert_eq!(repo_ref.path, "LICENSE");
    }

    #[test]
    fn raw_content_host_url() {
        let repo_ref = parse("https://raw.githubusercontent.com/org/pkg-a/master/LICENSE");
        assert_eq!(repo_ref.host, RepoHost::RawContent);
        assert_eq!(repo_ref.owner, "org");
        assert_eq!(repo_ref.repo, "pkg-a");
        assert_eq!(repo_ref.git_ref, "master");
    }

    #[test]
    fn legacy_raw_host_url() {
        let repo_ref = parse("https://raw.github.com/org/pkg-a/master/LICENSE");
        assert_eq!(repo_ref.host, RepoHost::RawContent);
        assert_eq!(repo_ref.git_ref, "master");
    }

    #[test]
    fn ref_defaults_to_master_when_absent() {
        let repo_ref = parse("https://github.com/org/pkg-a/LICENSE");
        assert_eq!(repo_ref.git_ref, "master");
        assert_eq!(repo_ref.path, "LICENSE");
    }

    #[test]
    fn nested_license_path_is_preserved() {
        let repo_ref = parse("https://github.com/org/pkg-a/blob/main/docs/LICENSE.md");
        assert_eq!(repo_ref.git_ref, "main");
        assert_eq!(repo_ref.path, "docs/LICENSE.md");
    }

    #[test]
    fn version_tag_in_ref_position_is_passed_through() {
        // Tags are not distinguished from branches at this layer.
        let repo_ref = parse("https://github.com/org/pkg-a/blob/v1.2.3/LICENSE");
        assert_eq!(repo_ref.git_ref, "v1.2.3");
    }

    #[test]
    fn unrecognized_host_is_rejected() {
        assert_eq!(
            parse_license_url("https://gitlab.com/org/pkg-a/blob/master/LICENSE"),
            None
        );
        assert_eq!(
            parse_license_url("https://opensource.org/licenses/MIT"),
            None
        );
    }

    #[test]
    fn non_license_path_is_rejected() {
        assert_eq!(
            parse_license_url("https://github.com/org/pkg-a/blob/master/README.md"),
            None
        );
        assert_eq!(parse_license_url("https://github.com/org/pkg-a"), None);
    }

    #[test]
    fn garbage_input_is_rejected() {
        assert_eq!(parse_license_url("not a url"), None);
        assert_eq!(parse_license_url(""), None);
        assert_eq!(
            parse_license_url("ftp://github.com/org/pkg-a/blob/master/LICENSE"),
            None
        );
    }

    #[test]
    fn license_file_names_match_case_insensitively() {
        for name in ["LICENSE", "license", "License", "LiCeNsE"] {
            assert!(is_license_file(name), "{name}");
        }
        for name in ["LICENSE.txt", "License.txt", "license.txt", "LICENSE.TXT"] {
            assert!(is_license_file(name), "{name}");
        }
    }

    #[test]
    fn license_file_extensions() {
        for name in [
            "LICENSE.md",
            "LICENSE.txt",
            "LICENSE.bsd",
            "LICENSE.BSD",
            "LICENSE.mit",
            "LICENSE.MIT",
        ] {
            assert!(is_license_file(name), "{name}");
        }
    }

    #[test]
    fn hyphenated_license_variants() {
        assert!(is_license_file("LICENSE-MIT"));
        assert!(is_license_file("LICENSE-APACHE"));
        assert!(is_license_file("license-bsd"));
        // A trailing hyphen with no variant suffix is not a license file.
        assert!(!is_license_file("LICENSE-"));
    }

    #[test]
    fn unrecognized_file_names_are_rejected() {
        assert!(!is_license_file("LICENSE.pdf"));
        assert!(!is_license_file("LICENSE.html"));
        assert!(!is_license_file("COPYING"));
        assert!(!is_license_file("README.md"));
        assert!(!is_license_file("NOTLICENSE"));
    }
}
