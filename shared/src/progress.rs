//! 进度计算
//!
//! 小节进度 = 已完成任务 / 全部任务；路径进度跨所有小节聚合。
//! 没有任何小节时退化为按路径状态估算。

use crate::{PathResponse, PathStatus, SectionResponse, TaskStatus};

/// 单个小节的完成比例，没有任务时为 0
pub fn section_progress(section: &SectionResponse) -> f64 {
    match &section.tasks {
        Some(tasks) if !tasks.is_empty() => {
            let completed = tasks
                .iter()
                .filter(|task| task.status() == TaskStatus::Completed)
                .count();
            completed as f64 / tasks.len() as f64
        }
        _ => 0.0,
    }
}

/// 路径的完成比例，基于已解析出的小节集合
///
/// 小节集合为空时退回状态估算；有小节但一个任务都没有时为 0。
pub fn path_progress(path: &PathResponse, sections: &[SectionResponse]) -> f64 {
    if sections.is_empty() {
        return status_progress(path.status());
    }
    let mut total = 0usize;
    let mut completed = 0usize;
    for section in sections {
        if let Some(tasks) = &section.tasks {
            total += tasks.len();
            completed += tasks
                .iter()
                .filter(|task| task.status() == TaskStatus::Completed)
                .count();
        }
    }
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64
    }
}

/// 按状态估算进度
pub fn status_progress(status: PathStatus) -> f64 {
    match status {
        PathStatus::Completed => 1.0,
        PathStatus::InProgress => 0.5,
        _ => 0.1,
    }
}

/// 展示用的百分比，四舍五入到整数
pub fn percent(fraction: f64) -> u32 {
    (fraction * 100.0).round() as u32
}

/// 仪表盘总览统计（本地计算版本）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverviewStats {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub average_percent: u32,
}

pub fn overview_stats(paths: &[PathResponse]) -> OverviewStats {
    let total = paths.len();
    let in_progress = paths
        .iter()
        .filter(|path| path.status() == PathStatus::InProgress)
        .count();
    let completed = paths
        .iter()
        .filter(|path| path.status() == PathStatus::Completed)
        .count();
    let average = if paths.is_empty() {
        0.0
    } else {
        let sum: f64 = paths
            .iter()
            .map(|path| path_progress(path, path.sections.as_deref().unwrap_or(&[])))
            .sum();
        sum / paths.len() as f64
    };
    OverviewStats {
        total,
        in_progress,
        completed,
        average_percent: percent(average),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Identifier, SectionPayload, TaskPayload, TaskResponse};

    fn task(id: &str, status: TaskStatus) -> TaskResponse {
        TaskResponse {
            id: Identifier::from(id),
            base: TaskPayload {
                title: format!("task {}", id),
                description: None,
                r#type: Some(status),
                status: Some(status),
                estimated_minutes: None,
            },
        }
    }

    fn section(id: &str, tasks: Option<Vec<TaskResponse>>) -> SectionResponse {
        SectionResponse {
            id: Identifier::from(id),
            status: None,
            tasks,
            base: SectionPayload {
                title: format!("section {}", id),
                description: None,
                order_index: None,
                estimated_days: None,
            },
        }
    }

    fn path(status: PathStatus, sections: Option<Vec<SectionResponse>>) -> PathResponse {
        PathResponse {
            id: Some(Identifier::from("p-1")),
            status: Some(status),
            sections,
            base: crate::PathPayload {
                title: "A path".to_string(),
                description: None,
                start_date: None,
                target_end_date: None,
            },
        }
    }

    #[test]
    fn test_section_progress_is_completed_share() {
        let section = section(
            "s-1",
            Some(vec![
                task("t-1", TaskStatus::Completed),
                task("t-2", TaskStatus::InProgress),
                task("t-3", TaskStatus::NotStarted),
            ]),
        );
        let progress = section_progress(&section);
        assert!((progress - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(percent(progress), 33);
    }

    #[test]
    fn test_section_without_tasks_is_zero() {
        assert_eq!(section_progress(&section("s-1", None)), 0.0);
        assert_eq!(section_progress(&section("s-2", Some(vec![]))), 0.0);
    }

    #[test]
    fn test_path_progress_aggregates_across_sections() {
        let sections = vec![
            section(
                "s-1",
                Some(vec![
                    task("t-1", TaskStatus::Completed),
                    task("t-2", TaskStatus::NotStarted),
                ]),
            ),
            section(
                "s-2",
                Some(vec![
                    task("t-3", TaskStatus::Skipped),
                    task("t-4", TaskStatus::InProgress),
                ]),
            ),
        ];
        let path = path(PathStatus::InProgress, None);
        let progress = path_progress(&path, &sections);
        assert!((progress - 0.25).abs() < 1e-9);
        assert_eq!(percent(progress), 25);
    }

    #[test]
    fn test_path_without_sections_approximates_from_status() {
        let sections: Vec<SectionResponse> = vec![];
        assert_eq!(
            path_progress(&path(PathStatus::Completed, None), &sections),
            1.0
        );
        assert_eq!(
            path_progress(&path(PathStatus::InProgress, None), &sections),
            0.5
        );
        assert_eq!(
            path_progress(&path(PathStatus::NotStarted, None), &sections),
            0.1
        );
        assert_eq!(path_progress(&path(PathStatus::OnHold, None), &sections), 0.1);
    }

    #[test]
    fn test_path_with_sections_but_no_tasks_is_zero() {
        let sections = vec![section("s-1", None), section("s-2", Some(vec![]))];
        let path = path(PathStatus::Completed, None);
        assert_eq!(path_progress(&path, &sections), 0.0);
    }

    #[test]
    fn test_percent_rounds_to_nearest() {
        assert_eq!(percent(0.0), 0);
        assert_eq!(percent(1.0 / 3.0), 33);
        assert_eq!(percent(0.675), 68);
        assert_eq!(percent(1.0), 100);
    }

    #[test]
    fn test_overview_stats_counts_and_average() {
        let paths = vec![
            path(PathStatus::Completed, None),
            path(PathStatus::NotStarted, None),
        ];
        let stats = overview_stats(&paths);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.in_progress, 0);
        assert_eq!(stats.completed, 1);
        // (1.0 + 0.1) / 2 = 0.55
        assert_eq!(stats.average_percent, 55);
    }

    #[test]
    fn test_overview_stats_empty_list() {
        let stats = overview_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_percent, 0);
    }
}
