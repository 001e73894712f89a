//! 路径集合缓存
//!
//! 全应用共享的学习路径列表，外加一组在不可变树上做定点修补的
//! 纯函数。每次修补都产出新列表，只重建命中的那条路径,
//! 其余条目原样保留。

use leptos::prelude::*;
use pathprogress_shared::{
    Identifier, PathPayload, PathResponse, SectionPayload, SectionResponse, TaskPayload,
    TaskResponse,
};

use crate::error::ApiError;

// ===== 共享缓存 =====

/// 注入到组件树的路径列表缓存
#[derive(Clone, Copy)]
pub struct PathsContext {
    pub paths: RwSignal<Vec<PathResponse>>,
}

impl PathsContext {
    pub fn new() -> Self {
        Self {
            paths: RwSignal::new(Vec::new()),
        }
    }

    pub fn set_all(&self, paths: Vec<PathResponse>) {
        self.paths.set(paths);
    }

    /// 清空缓存，退出登录时调用
    pub fn clear(&self) {
        self.paths.set(Vec::new());
    }

    /// 按 id 合并写入一条路径，不存在时追加
    pub fn upsert(&self, incoming: &PathResponse) {
        self.paths.update(|list| *list = upsert_path(list, incoming));
    }

    /// 对目标路径应用一次修补
    pub fn patch(&self, target: &Identifier, patch: &PathPatch) {
        self.paths
            .update(|list| *list = patch_path_in(list, target, patch));
    }

    pub fn remove(&self, target: &Identifier) {
        self.paths.update(|list| *list = remove_path(list, target));
    }
}

impl Default for PathsContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_paths() -> PathsContext {
    use_context::<PathsContext>().expect("PathsContext should be provided")
}

// ===== 定点修补 =====

/// 对单条路径的一次定点修补
///
/// 服务端的写操作一般只返回被改动的那个节点,
/// 这里负责把它并回本地缓存的树里。
#[derive(Debug, Clone, PartialEq)]
pub enum PathPatch {
    /// 合并路径自身的字段，响应里缺席的字段保留现值
    Fields(PathResponse),
    /// 按 id 替换一个小节，不存在时追加
    Section(SectionResponse),
    /// 删掉一个小节及其全部任务
    RemoveSection(Identifier),
    /// 按 id 替换小节下的一个任务，不存在时追加
    Task {
        section_id: Identifier,
        task: TaskResponse,
    },
    /// 删掉小节下的一个任务
    RemoveTask {
        section_id: Identifier,
        task_id: Identifier,
    },
}

/// id 比较，候选缺席视为不匹配
pub fn matches_id(candidate: Option<&Identifier>, target: &Identifier) -> bool {
    candidate.is_some_and(|id| id == target)
}

/// 在列表里找目标路径
pub fn find_path<'a>(paths: &'a [PathResponse], target: &Identifier) -> Option<&'a PathResponse> {
    paths.iter().find(|path| matches_id(path.id.as_ref(), target))
}

/// 合并写入：按 id 命中就字段合并，否则追加；id 缺席时原样返回
pub fn upsert_path(paths: &[PathResponse], incoming: &PathResponse) -> Vec<PathResponse> {
    let Some(target) = incoming.id.clone() else {
        return paths.to_vec();
    };
    let mut next = paths.to_vec();
    match paths
        .iter()
        .position(|path| matches_id(path.id.as_ref(), &target))
    {
        Some(index) => {
            let merged = merge_path(&paths[index], incoming);
            next[index] = merged;
        }
        None => next.push(incoming.clone()),
    }
    next
}

pub fn remove_path(paths: &[PathResponse], target: &Identifier) -> Vec<PathResponse> {
    paths
        .iter()
        .filter(|path| !matches_id(path.id.as_ref(), target))
        .cloned()
        .collect()
}

/// 把修补应用到列表里命中的那条路径，其余原样克隆
pub fn patch_path_in(
    paths: &[PathResponse],
    target: &Identifier,
    patch: &PathPatch,
) -> Vec<PathResponse> {
    paths
        .iter()
        .map(|path| {
            if matches_id(path.id.as_ref(), target) {
                apply_patch(path, patch)
            } else {
                path.clone()
            }
        })
        .collect()
}

/// 在一条路径上应用修补，返回新的路径值
///
/// 涉及子级的修补会把缺席的 `sections` 物化成空列表再操作;
/// 命中小节的任务列表同理。
pub fn apply_patch(path: &PathResponse, patch: &PathPatch) -> PathResponse {
    match patch {
        PathPatch::Fields(incoming) => merge_path(path, incoming),
        PathPatch::Section(incoming) => {
            let mut sections = path.sections.clone().unwrap_or_default();
            match sections
                .iter()
                .position(|section| section.id == incoming.id)
            {
                Some(index) => {
                    let merged = merge_section(&sections[index], incoming);
                    sections[index] = merged;
                }
                None => sections.push(incoming.clone()),
            }
            with_sections(path, sections)
        }
        PathPatch::RemoveSection(section_id) => {
            let mut sections = path.sections.clone().unwrap_or_default();
            sections.retain(|section| section.id != *section_id);
            with_sections(path, sections)
        }
        PathPatch::Task { section_id, task } => patch_tasks(path, section_id, |tasks| {
            match tasks.iter().position(|existing| existing.id == task.id) {
                Some(index) => {
                    let merged = merge_task(&tasks[index], task);
                    tasks[index] = merged;
                }
                None => tasks.push(task.clone()),
            }
        }),
        PathPatch::RemoveTask {
            section_id,
            task_id,
        } => patch_tasks(path, section_id, |tasks| {
            tasks.retain(|task| task.id != *task_id);
        }),
    }
}

/// 小节里的任务尚未从服务端展开时，拒绝针对任务的写操作
pub fn ensure_tasks_loaded(section: &SectionResponse) -> Result<(), ApiError> {
    if section.tasks.is_some() {
        Ok(())
    } else {
        Err(ApiError::Precondition(
            "Tasks not loaded from the server yet. Please retry later.".to_string(),
        ))
    }
}

// ===== 合并规则 =====

/// `incoming` 的字段优先，缺席字段落回 `existing`
fn merge_path(existing: &PathResponse, incoming: &PathResponse) -> PathResponse {
    PathResponse {
        id: incoming.id.clone().or_else(|| existing.id.clone()),
        status: incoming.status.or(existing.status),
        sections: incoming
            .sections
            .clone()
            .or_else(|| existing.sections.clone()),
        base: PathPayload {
            title: incoming.base.title.clone(),
            description: incoming
                .base
                .description
                .clone()
                .or_else(|| existing.base.description.clone()),
            start_date: incoming
                .base
                .start_date
                .clone()
                .or_else(|| existing.base.start_date.clone()),
            target_end_date: incoming
                .base
                .target_end_date
                .clone()
                .or_else(|| existing.base.target_end_date.clone()),
        },
    }
}

fn merge_section(existing: &SectionResponse, incoming: &SectionResponse) -> SectionResponse {
    SectionResponse {
        id: incoming.id.clone(),
        status: incoming.status.or(existing.status),
        tasks: incoming.tasks.clone().or_else(|| existing.tasks.clone()),
        base: SectionPayload {
            title: incoming.base.title.clone(),
            description: incoming
                .base
                .description
                .clone()
                .or_else(|| existing.base.description.clone()),
            order_index: incoming.base.order_index.or(existing.base.order_index),
            estimated_days: incoming.base.estimated_days.or(existing.base.estimated_days),
        },
    }
}

fn merge_task(existing: &TaskResponse, incoming: &TaskResponse) -> TaskResponse {
    TaskResponse {
        id: incoming.id.clone(),
        base: TaskPayload {
            title: incoming.base.title.clone(),
            description: incoming
                .base
                .description
                .clone()
                .or_else(|| existing.base.description.clone()),
            r#type: incoming.base.r#type.or(existing.base.r#type),
            status: incoming.base.status.or(existing.base.status),
            estimated_minutes: incoming
                .base
                .estimated_minutes
                .or(existing.base.estimated_minutes),
        },
    }
}

fn with_sections(path: &PathResponse, sections: Vec<SectionResponse>) -> PathResponse {
    PathResponse {
        sections: Some(sections),
        ..path.clone()
    }
}

/// 只改写命中小节的任务列表，其余小节原样保留
fn patch_tasks(
    path: &PathResponse,
    section_id: &Identifier,
    edit: impl FnOnce(&mut Vec<TaskResponse>),
) -> PathResponse {
    let mut sections = path.sections.clone().unwrap_or_default();
    if let Some(section) = sections.iter_mut().find(|section| &section.id == section_id) {
        let mut tasks = section.tasks.take().unwrap_or_default();
        edit(&mut tasks);
        section.tasks = Some(tasks);
    }
    with_sections(path, sections)
}

#[cfg(test)]
mod tests;
