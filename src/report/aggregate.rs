use crate::config::ReportOptions;
use crate::model::{AuthorId, CommitRecord, Contributor};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub commit_count: usize,
    pub merged_pull_requests: usize,
    /// First-seen order.
    pub contributors: Vec<Contributor>,
}

pub fn summarize(commits: &[CommitRecord], options: &ReportOptions) -> Summary {
    let marker = options.merge_marker.as_str();
    Summary {
        commit_count: commits.len(),
        merged_pull_requests: count_merges(commits, marker),
        contributors: tally_contributors(
            commits
                .iter()
                .filter(|c| !(options.exclude_merges && c.is_merge(marker))),
        ),
    }
}

pub fn count_merges(commits: &[CommitRecord], marker: &str) -> usize {
    commits.iter().filter(|c| c.is_merge(marker)).count()
}

/// Commits without an author id are not attributed to anyone. The display
/// name is taken from the first commit seen for each id.
pub fn tally_contributors<'a, I>(commits: I) -> Vec<Contributor>
where
    I: IntoIterator<Item = &'a CommitRecord>,
{
    let mut index: HashMap<AuthorId, usize> = HashMap::new();
    let mut contributors: Vec<Contributor> = Vec::new();

    for commit in commits {
        let Some(id) = &commit.author_id else {
            continue;
        };
        let slot = *index.entry(id.clone()).or_insert_with(|| {
            contributors.push(Contributor {
                author_id: id.clone(),
                name: commit.author.clone(),
                commits: 0,
            });
            contributors.len() - 1
        });
        contributors[slot].commits += 1;
    }

    contributors
}
