// ==========================================
// 物料库存系统 - 物料记录仓储
// ==========================================
// 存储: 单个 JSON 文件（有序数组，2 空格缩进，字段名与实体一致）
// 写入: 整体覆盖，临时文件 + rename 保证原子可见
// 并发: 每个仓储实例一把写锁，包住 读取-修改-保存 全过程
// ==========================================

use crate::domain::material::{MaterialPatch, MaterialRecord, NewMaterial};
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// 下一个可用 id：现有最大 id + 1，空集合时为 1
///
/// 最大 id 已到 u64::MAX 时返回 IdExhausted
pub fn next_id(records: &[MaterialRecord]) -> RepositoryResult<u64> {
    match records.iter().map(|r| r.id).max() {
        Some(max) => max
            .checked_add(1)
            .ok_or(RepositoryError::IdExhausted { max_id: max }),
        None => Ok(1),
    }
}

/// 为一批新记录连续分配 id（返回首个 id）
pub fn allocate_ids(records: &[MaterialRecord], count: usize) -> RepositoryResult<u64> {
    let first = next_id(records)?;
    let span = (count as u64).saturating_sub(1);
    first
        .checked_add(span)
        .ok_or(RepositoryError::IdExhausted { max_id: first - 1 })?;
    Ok(first)
}

// ==========================================
// MaterialRepository - 物料记录仓储
// ==========================================
/// 物料记录仓储（Record Store）
/// 职责: 持有记录集合的身份与完整性，负责 id 分配与持久化
/// 红线: 不缓存，每次读取都从文件加载
pub struct MaterialRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl MaterialRepository {
    /// 创建仓储实例（不触碰文件系统）
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// 打开仓储：确保目录存在，文件缺失时写入空数组
    pub fn open(path: impl Into<PathBuf>) -> RepositoryResult<Self> {
        let repo = Self::new(path);
        if !repo.path.exists() {
            info!(path = %repo.path.display(), "数据文件不存在，初始化为空集合");
            repo.save(&[])?;
        }
        Ok(repo)
    }

    /// 数据文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 写锁只保护 ()，被 panic 毒化后照常接管
    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|poisoned| {
            warn!(path = %self.path.display(), "写锁曾被 panic 线程持有，继续使用");
            PoisonError::into_inner(poisoned)
        })
    }

    // ==========================================
    // 基础读写
    // ==========================================

    /// 加载全部记录（保持文件中的顺序）
    ///
    /// # 说明
    /// - 文件缺失、为空或解析失败时返回空集合，从不向调用方报错
    pub fn load(&self) -> Vec<MaterialRecord> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "数据文件不存在");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "数据文件读取失败，按空集合处理");
                return Vec::new();
            }
        };

        if content.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str::<Vec<MaterialRecord>>(&content) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "数据文件解析失败，按空集合处理");
                Vec::new()
            }
        }
    }

    /// 整体覆盖保存
    ///
    /// # 说明
    /// - 先写同目录临时文件并 fsync，再 rename 覆盖目标
    /// - 任一步失败，原文件保持不变
    pub fn save(&self, records: &[MaterialRecord]) -> RepositoryResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| RepositoryError::storage(&dir, e))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| RepositoryError::storage(&dir, e))?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, records)?;
            writer
                .flush()
                .map_err(|e| RepositoryError::storage(&self.path, e))?;
        }
        tmp.as_file()
            .sync_all()
            .map_err(|e| RepositoryError::storage(&self.path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| RepositoryError::storage(&self.path, e.error))?;

        debug!(path = %self.path.display(), count = records.len(), "数据文件已保存");
        Ok(())
    }

    /// 在写锁内执行 读取-修改-保存
    ///
    /// # 说明
    /// - 闭包返回 Err 时不保存，文件保持原样
    pub fn mutate<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut Vec<MaterialRecord>) -> RepositoryResult<T>,
    {
        let _guard = self.lock_writer();
        let mut records = self.load();
        let result = f(&mut records)?;
        self.save(&records)?;
        Ok(result)
    }

    // ==========================================
    // 记录操作
    // ==========================================

    /// 按 id 查询
    pub fn find_by_id(&self, id: u64) -> Option<MaterialRecord> {
        self.load().into_iter().find(|r| r.id == id)
    }

    /// 新增记录：分配 id = next_id 并追加到末尾
    pub fn insert(&self, new: NewMaterial) -> RepositoryResult<MaterialRecord> {
        if !new.has_name() {
            return Err(RepositoryError::ValidationError("nombre 不能为空".to_string()));
        }

        let record = self.mutate(|records| {
            let record = MaterialRecord::from_new(next_id(records)?, new);
            records.push(record.clone());
            Ok(record)
        })?;

        info!(id = record.id, nombre = %record.nombre, "新增物料");
        Ok(record)
    }

    /// 部分更新：浅覆盖补丁中出现的字段
    pub fn update(&self, id: u64, patch: MaterialPatch) -> RepositoryResult<MaterialRecord> {
        if patch.clears_name() {
            return Err(RepositoryError::ValidationError("nombre 不能为空".to_string()));
        }

        let record = self.mutate(|records| {
            let record = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| RepositoryError::material_not_found(id))?;
            record.apply_patch(patch);
            Ok(record.clone())
        })?;

        info!(id = id, "更新物料");
        Ok(record)
    }

    /// 删除记录
    pub fn delete(&self, id: u64) -> RepositoryResult<MaterialRecord> {
        let removed = self.mutate(|records| {
            let index = records
                .iter()
                .position(|r| r.id == id)
                .ok_or_else(|| RepositoryError::material_not_found(id))?;
            Ok(records.remove(index))
        })?;

        info!(id = id, "删除物料");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, MaterialRepository) {
        let dir = TempDir::new().unwrap();
        let repo = MaterialRepository::open(dir.path().join("materiales.json")).unwrap();
        (dir, repo)
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(&[]).unwrap(), 1);

        let records = vec![
            MaterialRecord::from_new(4, NewMaterial::named("A")),
            MaterialRecord::from_new(2, NewMaterial::named("B")),
        ];
        assert_eq!(next_id(&records).unwrap(), 5);
    }

    #[test]
    fn test_next_id_exhausted() {
        let records = vec![MaterialRecord::from_new(u64::MAX, NewMaterial::named("A"))];
        assert!(matches!(
            next_id(&records),
            Err(RepositoryError::IdExhausted { max_id: u64::MAX })
        ));

        let records = vec![MaterialRecord::from_new(u64::MAX - 1, NewMaterial::named("A"))];
        assert_eq!(allocate_ids(&records, 1).unwrap(), u64::MAX);
        assert!(matches!(
            allocate_ids(&records, 2),
            Err(RepositoryError::IdExhausted { .. })
        ));
    }

    #[test]
    fn test_insert_at_max_id_fails_then_recovers() {
        let (_dir, repo) = setup();
        fs::write(
            repo.path(),
            format!(r#"[{{"id": {}, "nombre": "Tope"}}]"#, u64::MAX),
        )
        .unwrap();
        let before = fs::read_to_string(repo.path()).unwrap();

        let result = repo.insert(NewMaterial::named("Nuevo"));
        assert!(matches!(result, Err(RepositoryError::IdExhausted { .. })));
        assert_eq!(fs::read_to_string(repo.path()).unwrap(), before);

        // 最大 id 回落后恢复分配
        fs::write(repo.path(), "[]").unwrap();
        let record = repo.insert(NewMaterial::named("Nuevo")).unwrap();
        assert_eq!(record.id, 1);
    }

    #[test]
    fn test_writer_lock_recovers_after_panic() {
        let (_dir, repo) = setup();
        let repo = std::sync::Arc::new(repo);

        let shared = std::sync::Arc::clone(&repo);
        let joined = std::thread::spawn(move || {
            let _ = shared.mutate(|_records| -> RepositoryResult<()> { panic!("写入中途崩溃") });
        })
        .join();
        assert!(joined.is_err());

        let record = repo.insert(NewMaterial::named("Taladro")).unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(repo.load().len(), 1);
    }

    #[test]
    fn test_open_creates_empty_file() {
        let (_dir, repo) = setup();
        let content = fs::read_to_string(repo.path()).unwrap();
        assert_eq!(content.trim(), "[]");
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_load_missing_empty_and_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("materiales.json");
        let repo = MaterialRepository::new(&path);

        // 缺失
        assert!(repo.load().is_empty());

        // 空文件
        fs::write(&path, "").unwrap();
        assert!(repo.load().is_empty());

        // 损坏
        fs::write(&path, "{not json").unwrap();
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let (_dir, repo) = setup();

        let a = repo.insert(NewMaterial::named("Taladro")).unwrap();
        let b = repo.insert(NewMaterial::named("Cable")).unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.load().len(), 2);
    }

    #[test]
    fn test_insert_rejects_blank_name() {
        let (_dir, repo) = setup();
        let result = repo.insert(NewMaterial::named("   "));
        assert!(matches!(result, Err(RepositoryError::ValidationError(_))));
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_ids_not_reassigned_after_delete() {
        let (_dir, repo) = setup();
        for name in ["A", "B", "C"] {
            repo.insert(NewMaterial::named(name)).unwrap();
        }

        repo.delete(2).unwrap();
        let d = repo.insert(NewMaterial::named("D")).unwrap();

        assert_eq!(d.id, 4);
        let ids: Vec<u64> = repo.load().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_update_not_found_leaves_file() {
        let (_dir, repo) = setup();
        repo.insert(NewMaterial::named("A")).unwrap();
        let before = fs::read_to_string(repo.path()).unwrap();

        let result = repo.update(42, MaterialPatch::default());
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
        assert_eq!(fs::read_to_string(repo.path()).unwrap(), before);
    }

    #[test]
    fn test_delete_not_found() {
        let (_dir, repo) = setup();
        for name in ["A", "B", "C"] {
            repo.insert(NewMaterial::named(name)).unwrap();
        }

        let result = repo.delete(99);
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
        assert_eq!(repo.load().len(), 3);
    }

    #[test]
    fn test_save_is_pretty_json_array() {
        let (_dir, repo) = setup();
        repo.insert(NewMaterial::named("Taladro")).unwrap();

        let content = fs::read_to_string(repo.path()).unwrap();
        assert!(content.starts_with("[\n  {"));
        assert!(content.contains("\"nombre\": \"Taladro\""));
    }
}
