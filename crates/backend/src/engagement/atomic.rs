//! Точка расширения для цепочек "прочитать-изменить-записать".
//!
//! Все такие цепочки агрегатора идут через [`AtomicApply::run`] с ключом
//! затрагиваемой записи. Стратегия по умолчанию ничего не блокирует:
//! параллельные инкременты теряют обновления, а
//! параллельные первые оценки или лайки создают дубли. Замена стратегии
//! (мьютекс, транзакция, оптимистичная блокировка) не меняет вызовы.

use async_trait::async_trait;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;

use crate::shared::config::ConsistencyMode;

/// Разрешение на выполнение цепочки; держится до её завершения
pub struct KeyPermit {
    _guard: Option<OwnedMutexGuard<()>>,
}

impl KeyPermit {
    pub fn unguarded() -> Self {
        Self { _guard: None }
    }

    pub fn held(guard: OwnedMutexGuard<()>) -> Self {
        Self {
            _guard: Some(guard),
        }
    }
}

#[async_trait]
pub trait KeyLock: Send + Sync {
    async fn acquire(&self, key: &str) -> KeyPermit;

    fn name(&self) -> &'static str;
}

/// Без взаимного исключения
#[derive(Debug, Default)]
pub struct NoLock;

#[async_trait]
impl KeyLock for NoLock {
    async fn acquire(&self, _key: &str) -> KeyPermit {
        KeyPermit::unguarded()
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Асинхронный мьютекс на ключ. Защищает только от гонок внутри одного
/// процесса: несколько экземпляров сервера по-прежнему конкурируют.
#[derive(Debug, Default)]
pub struct ProcessLocks {
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

#[async_trait]
impl KeyLock for ProcessLocks {
    async fn acquire(&self, key: &str) -> KeyPermit {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.entry(key.to_string()).or_default().clone()
        };
        KeyPermit::held(lock.lock_owned().await)
    }

    fn name(&self) -> &'static str {
        "process"
    }
}

#[derive(Clone)]
pub struct AtomicApply {
    lock: Arc<dyn KeyLock>,
}

impl AtomicApply {
    pub fn new(lock: Arc<dyn KeyLock>) -> Self {
        Self { lock }
    }

    pub fn non_atomic() -> Self {
        Self::new(Arc::new(NoLock))
    }

    pub fn process_local() -> Self {
        Self::new(Arc::new(ProcessLocks::default()))
    }

    pub fn from_mode(mode: ConsistencyMode) -> Self {
        match mode {
            ConsistencyMode::None => Self::non_atomic(),
            ConsistencyMode::Process => Self::process_local(),
        }
    }

    pub fn strategy(&self) -> &'static str {
        self.lock.name()
    }

    /// Выполнить `op` под разрешением для `key`. Отмены и отката нет: если
    /// запись после успешного чтения упала, ошибка просто уходит наверх.
    pub async fn run<T, F, Fut>(&self, key: &str, op: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let _permit = self.lock.acquire(key).await;
        op().await
    }
}

impl std::fmt::Debug for AtomicApply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtomicApply")
            .field("strategy", &self.strategy())
            .finish()
    }
}
