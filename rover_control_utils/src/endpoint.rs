//! 控制服务器的地址解析。
//!
//! 所有请求地址都由一个固定的基地址加若干路径段拼接而成。
//! 基地址在构造时校验一次，之后的拼接不会失败。

use common_models::{ControlCommand, LiveViewSource};
use url::Url;

use crate::error::ControlError;

/// 解析并校验一个服务器基地址。
pub fn parse_base_url(raw: &str) -> Result<Url, ControlError> {
    let url = Url::parse(raw.trim()).map_err(|source| ControlError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(ControlError::CannotBeABase(raw.to_string()));
    }
    Ok(url)
}

/// 在基地址的路径之后追加路径段。
///
/// 基地址末尾的空路径段（即结尾的 `/`）会被去掉，因此
/// `http://host:8000` 与 `http://host:8000/` 得到相同的结果。
pub fn join_segments<I, S>(base: &Url, segments: I) -> Url
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut url = base.clone();
    // parse_base_url 已排除 cannot-be-a-base 的地址
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// 控制服务器上消费的全部端点。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlEndpoints {
    base: Url,
}

impl ControlEndpoints {
    pub fn parse(base_url: &str) -> Result<Self, ControlError> {
        Ok(Self { base: parse_base_url(base_url)? })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `POST /move/{direction}`、`POST /stop`、`POST /speed/{value}`
    pub fn command_url(&self, command: &ControlCommand) -> Url {
        join_segments(&self.base, command.path_segments())
    }

    /// `GET /video_feed/{faceFlag}` 或 `GET /video`
    pub fn stream_url(&self, source: &LiveViewSource) -> Url {
        join_segments(&self.base, source.path_segments())
    }

    /// `GET /distance`
    pub fn distance_url(&self) -> Url {
        join_segments(&self.base, ["distance"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common_models::{Direction, SpeedLevel};

    #[test]
    fn test_command_urls() {
        let endpoints = ControlEndpoints::parse("http://localhost:8000").unwrap();
        let up = ControlCommand::Move { direction: Direction::Up };
        assert_eq!(endpoints.command_url(&up).as_str(), "http://localhost:8000/move/up");
        assert_eq!(endpoints.command_url(&ControlCommand::Stop).as_str(), "http://localhost:8000/stop");
        let speed = ControlCommand::Speed { level: SpeedLevel::try_from(10).unwrap() };
        assert_eq!(endpoints.command_url(&speed).as_str(), "http://localhost:8000/speed/100");
    }

    #[test]
    fn test_trailing_slash_and_sub_path() {
        let with_slash = ControlEndpoints::parse("http://10.0.0.2:8000/").unwrap();
        assert_eq!(with_slash.distance_url().as_str(), "http://10.0.0.2:8000/distance");

        let nested = ControlEndpoints::parse("http://robot.local/api/").unwrap();
        let source = LiveViewSource::Embedded { face_detection: true };
        assert_eq!(nested.stream_url(&source).as_str(), "http://robot.local/api/video_feed/true");
        assert_eq!(nested.stream_url(&LiveViewSource::Plain).as_str(), "http://robot.local/api/video");
    }

    #[test]
    fn test_invalid_base_urls_are_rejected() {
        assert!(matches!(
            ControlEndpoints::parse("not a url"),
            Err(ControlError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ControlEndpoints::parse("mailto:rover@example.com"),
            Err(ControlError::CannotBeABase(_))
        ));
    }
}
