/*
 * @Author       : 老董
 * @Date         : 2026-03-07
 * @Description  : 生命周期事件日志：构建、训练、输出等事件按调用顺序追加
 *
 * 不是全局单例：由调用方创建并显式传入需要记录事件的操作，
 * 核心逻辑从不读取它。
 */

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// 一条带时间戳的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    timestamp: SystemTime,
    description: String,
}

impl Event {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            timestamp: SystemTime::now(),
            description: description.into(),
        }
    }

    pub const fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// 输出为"<Unix 秒数>.<毫秒> <描述>"
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let since_epoch = self.timestamp.duration_since(UNIX_EPOCH).unwrap_or_default();
        write!(
            f,
            "{}.{:03} {}",
            since_epoch.as_secs(),
            since_epoch.subsec_millis(),
            self.description
        )
    }
}

/// 只追加的事件日志
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn log_event(&mut self, description: impl Into<String>) {
        self.events.push(Event::new(description));
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// 取出并清空所有事件（进程结束时冲刷日志）
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl fmt::Display for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "{event}")?;
        }
        Ok(())
    }
}
