//! 演示模式数据层
//!
//! 后端不可达时接管路径列表的读写，数据落在浏览器本地存储里,
//! 首次访问（或存量损坏时）用内置种子初始化。

use std::sync::atomic::{AtomicU32, Ordering};

use pathprogress_shared::{
    date, Identifier, PathPayload, PathResponse, PathStatus, STORAGE_DEMO_KEY,
};

use crate::seed::SEED_PATHS;
use crate::web::storage::KeyValueStore;

/// 附在毫秒时间戳后面的进程内序号，同一毫秒内多次创建也不会撞 id
static DEMO_ID_SEQ: AtomicU32 = AtomicU32::new(0);

const DEFAULT_DESCRIPTION: &str = "No description yet.";

// ===== 演示存储 =====

/// 演示路径存储，泛型于键值存储以便在原生环境下测试
#[derive(Clone)]
pub struct DemoStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> DemoStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 读取演示路径列表
    ///
    /// 存量非空就直接返回；没存过、存的内容损坏或是空列表时,
    /// 先把种子落盘再返回。持久化失败时仍然返回种子，只是不保留。
    pub fn get_all(&self) -> Vec<PathResponse> {
        if let Some(stored) = self.read_stored() {
            if !stored.is_empty() {
                return stored;
            }
        }
        let fallback = fallback_paths();
        self.persist(&fallback);
        fallback
    }

    /// 追加一条演示路径并持久化，返回补全默认值后的新记录
    pub fn append(&self, payload: PathPayload) -> PathResponse {
        let raw_start = non_empty(payload.start_date);
        let raw_end = non_empty(payload.target_end_date);

        let record = PathResponse {
            id: Some(Identifier::Text(next_demo_id())),
            status: Some(PathStatus::NotStarted),
            sections: None,
            base: PathPayload {
                title: payload.title,
                description: non_empty(payload.description)
                    .or_else(|| Some(DEFAULT_DESCRIPTION.to_string())),
                start_date: Some(raw_start.clone().unwrap_or_else(date::today_string)),
                target_end_date: Some(
                    raw_end
                        .or(raw_start)
                        .unwrap_or_else(|| date::offset_from_today(30)),
                ),
            },
        };

        let mut paths = self.get_all();
        paths.push(record.clone());
        self.persist(&paths);
        record
    }

    /// 清空演示数据，下次读取时重新落种子
    pub fn reset(&self) {
        self.store.delete(STORAGE_DEMO_KEY);
    }

    fn read_stored(&self) -> Option<Vec<PathResponse>> {
        let raw = self.store.get(STORAGE_DEMO_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    fn persist(&self, paths: &[PathResponse]) {
        if let Ok(json) = serde_json::to_string(paths) {
            self.store.set(STORAGE_DEMO_KEY, &json);
        }
    }
}

// ===== 种子构造 =====

/// 用内置种子构造演示列表
///
/// 日期按条目序号错开：每条比前一条早十天开始，周期固定三十天。
/// 种子不携带小节，详情页会按需补上。
pub fn fallback_paths() -> Vec<PathResponse> {
    SEED_PATHS
        .iter()
        .enumerate()
        .map(|(index, seed)| {
            let offset = -(10 * index as i64);
            PathResponse {
                id: Some(Identifier::from(seed.id)),
                status: Some(derive_status(seed.progress)),
                sections: None,
                base: PathPayload {
                    title: seed.title.to_string(),
                    description: Some(seed.description.to_string()),
                    start_date: Some(date::offset_from_today(offset)),
                    target_end_date: Some(date::offset_from_today(offset + 30)),
                },
            }
        })
        .collect()
}

/// 按整体完成度推导演示路径状态
fn derive_status(progress: f64) -> PathStatus {
    if progress >= 1.0 {
        PathStatus::Completed
    } else if progress > 0.0 {
        PathStatus::InProgress
    } else {
        PathStatus::NotStarted
    }
}

fn next_demo_id() -> String {
    let seq = DEMO_ID_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("demo-{}-{}", date::now_millis(), seq)
}

/// 空字符串视同缺省，与表单留空提交保持一致
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

// ===== 测试 =====
