use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const CONFIG_PATH: &str = "ai_config.json";
// Used only if a schedule has no entry covering the position.
const FALLBACK_DEPTH: usize = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AIConfig {
    pub version: String,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Depth by number of moves already played; the entry with the largest
    /// `min_moves` not exceeding the move count wins.
    pub depth_schedule: Vec<DepthStep>,
    /// Wall-clock budget per search. When set, the engine deepens one ply
    /// at a time and keeps the deepest iteration that finished in time.
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthStep {
    pub min_moves: usize,
    pub depth: usize,
}

impl SearchConfig {
    /// Always search to `depth`, with no time limit.
    pub fn fixed(depth: usize) -> Self {
        SearchConfig {
            depth_schedule: vec![DepthStep {
                min_moves: 0,
                depth,
            }],
            time_limit_ms: None,
        }
    }

    pub fn depth_for(&self, moves_played: usize) -> usize {
        self.depth_schedule
            .iter()
            .filter(|step| step.min_moves <= moves_played)
            .max_by_key(|step| step.min_moves)
            .map_or(FALLBACK_DEPTH, |step| step.depth)
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}

impl Default for SearchConfig {
    // Early positions branch in the thousands, so depth grows as the
    // board fills up. Untimed: the result depends only on the position.
    fn default() -> Self {
        SearchConfig {
            depth_schedule: vec![
                DepthStep { min_moves: 0, depth: 3 },
                DepthStep { min_moves: 2, depth: 6 },
                DepthStep { min_moves: 5, depth: 8 },
                DepthStep { min_moves: 8, depth: 10 },
            ],
            time_limit_ms: None,
        }
    }
}

impl AIConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_path(CONFIG_PATH)
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config: AIConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| Self::default())
    }
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            version: "1.0".to_string(),
            search: SearchConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let search = SearchConfig::default();
        assert_eq!(search.depth_for(0), 3);
        assert_eq!(search.depth_for(1), 3);
        assert_eq!(search.depth_for(2), 6);
        assert_eq!(search.depth_for(4), 6);
        assert_eq!(search.depth_for(5), 8);
        assert_eq!(search.depth_for(8), 10);
        assert_eq!(search.depth_for(60), 10);
        assert_eq!(search.time_limit(), None);
    }

    #[test]
    fn test_schedule_order_does_not_matter() {
        let search = SearchConfig {
            depth_schedule: vec![
                DepthStep { min_moves: 10, depth: 4 },
                DepthStep { min_moves: 0, depth: 2 },
            ],
            time_limit_ms: None,
        };
        assert_eq!(search.depth_for(3), 2);
        assert_eq!(search.depth_for(12), 4);

        let empty = SearchConfig {
            depth_schedule: Vec::new(),
            time_limit_ms: None,
        };
        assert_eq!(empty.depth_for(0), FALLBACK_DEPTH);
    }

    #[test]
    fn test_json_round_trip_with_missing_time_limit() {
        let json = r#"{
            "version": "2.0",
            "search": { "depth_schedule": [ { "min_moves": 0, "depth": 2 } ] }
        }"#;
        let config: AIConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.search, SearchConfig::fixed(2));
        assert_eq!(config.search.time_limit(), None);
    }

    #[test]
    fn test_from_path_missing_file() {
        assert!(AIConfig::from_path("definitely/not/here.json").is_err());
    }
}
