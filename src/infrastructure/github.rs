use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{UpstreamError, read_json};
use crate::config::Config;
use crate::models::{DEFAULT_LANGUAGE_COLOR, GithubStats, LanguageShare, MAX_CALENDAR_LEVEL};

const SERVICE: &str = "github";
const TOP_LANGUAGES: usize = 5;

const CONTRIBUTIONS_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    contributionsCollection {
      totalCommitContributions
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
          }
        }
      }
    }
    repositories(first: 100, ownerAffiliations: OWNER, orderBy: {field: STARGAZERS, direction: DESC}) {
      nodes {
        languages(first: 5, orderBy: {field: SIZE, direction: DESC}) {
          edges {
            size
            node { name color }
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct UserResponse {
    public_repos: u64,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<GraphqlData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GraphqlData {
    user: Option<GraphqlUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlUser {
    contributions_collection: ContributionsCollection,
    repositories: RepositoryConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    total_commit_contributions: u64,
    contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionCalendar {
    total_contributions: u64,
    #[serde(default)]
    weeks: Vec<ContributionWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionWeek {
    #[serde(default)]
    contribution_days: Vec<ContributionDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionDay {
    contribution_count: u64,
}

#[derive(Debug, Deserialize)]
struct RepositoryConnection {
    #[serde(default)]
    nodes: Vec<Repository>,
}

#[derive(Debug, Deserialize)]
struct Repository {
    languages: Option<LanguageConnection>,
}

#[derive(Debug, Deserialize)]
struct LanguageConnection {
    #[serde(default)]
    edges: Vec<LanguageEdge>,
}

#[derive(Debug, Deserialize)]
struct LanguageEdge {
    size: u64,
    node: LanguageNode,
}

#[derive(Debug, Deserialize)]
struct LanguageNode {
    name: String,
    color: Option<String>,
}

/// GitHub REST + GraphQL 统计客户端
#[derive(Clone)]
pub struct GithubClient {
    http: Client,
    api_url: String,
    token: String,
    username: String,
}

impl GithubClient {
    /// 未配置 token/username 时返回 `NotConfigured`
    pub fn from_config(http: &Client, config: &Config) -> Result<Self, UpstreamError> {
        let credentials = config
            .github
            .as_ref()
            .ok_or(UpstreamError::NotConfigured(SERVICE))?;
        Ok(Self {
            http: http.clone(),
            api_url: config.github_api_url.trim_end_matches('/').to_string(),
            token: credentials.token.clone(),
            username: credentials.username.clone(),
        })
    }

    pub async fn fetch_stats(&self) -> Result<GithubStats, UpstreamError> {
        let (user, contributions) =
            futures_util::try_join!(self.fetch_user(), self.fetch_contributions())?;

        let calendar = &contributions.contributions_collection.contribution_calendar;
        Ok(GithubStats {
            total_contributions: calendar.total_contributions,
            total_commits: contributions
                .contributions_collection
                .total_commit_contributions,
            public_repos: user.public_repos,
            top_languages: top_languages(&contributions.repositories.nodes),
            contribution_calendar: calendar_levels(&calendar.weeks),
        })
    }

    async fn fetch_user(&self) -> Result<UserResponse, UpstreamError> {
        let response = self
            .http
            .get(format!("{}/users/{}", self.api_url, self.username))
            .bearer_auth(&self.token)
            .send()
            .await;
        read_json(SERVICE, response).await
    }

    async fn fetch_contributions(&self) -> Result<GraphqlUser, UpstreamError> {
        let response = self
            .http
            .post(format!("{}/graphql", self.api_url))
            .bearer_auth(&self.token)
            .json(&json!({
                "query": CONTRIBUTIONS_QUERY,
                "variables": { "login": self.username },
            }))
            .send()
            .await;
        let body: GraphqlResponse = read_json(SERVICE, response).await?;

        if let Some(error) = body.errors.first() {
            return Err(UpstreamError::Malformed {
                service: SERVICE,
                reason: error.message.clone(),
            });
        }
        body.data
            .and_then(|data| data.user)
            .ok_or_else(|| UpstreamError::Malformed {
                service: SERVICE,
                reason: format!("user `{}` not found", self.username),
            })
    }
}

/// 按语言汇总所有仓库的代码量，取前五并换算成百分比
fn top_languages(repositories: &[Repository]) -> Vec<LanguageShare> {
    let mut totals: Vec<(String, u64, String)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let edges = repositories
        .iter()
        .filter_map(|repo| repo.languages.as_ref())
        .flat_map(|languages| languages.edges.iter());
    for edge in edges {
        let color = edge
            .node
            .color
            .clone()
            .unwrap_or_else(|| DEFAULT_LANGUAGE_COLOR.to_string());
        match index.get(&edge.node.name) {
            Some(&i) => {
                totals[i].1 += edge.size;
                totals[i].2 = color;
            }
            None => {
                index.insert(edge.node.name.clone(), totals.len());
                totals.push((edge.node.name.clone(), edge.size, color));
            }
        }
    }

    let total_size: u64 = totals.iter().map(|(_, size, _)| size).sum();
    if total_size == 0 {
        return Vec::new();
    }

    // 稳定排序，同等大小保持首次出现的顺序
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
        .into_iter()
        .take(TOP_LANGUAGES)
        .map(|(name, size, color)| LanguageShare {
            name,
            percentage: (size as f64 / total_size as f64 * 100.0).round() as u32,
            color,
        })
        .collect()
}

fn calendar_levels(weeks: &[ContributionWeek]) -> Vec<Vec<u8>> {
    weeks
        .iter()
        .map(|week| {
            week.contribution_days
                .iter()
                .map(|day| day.contribution_count.min(MAX_CALENDAR_LEVEL as u64) as u8)
                .collect()
        })
        .collect()
}
