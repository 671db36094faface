// ============================================================================
// OPTIMISTIC UI - Aplicar ya, confirmar con el backend, revertir si falla
// ============================================================================

use std::future::Future;

/// Ejecuta `apply` antes de esperar `confirm`; si la confirmación falla,
/// ejecuta `revert` y devuelve el error sin tocarlo.
pub async fn apply_optimistic<T, E, A, R, F>(apply: A, revert: R, confirm: F) -> Result<T, E>
where
    A: FnOnce(),
    R: FnOnce(),
    F: Future<Output = Result<T, E>>,
{
    apply();
    let result = confirm.await;
    if result.is_err() {
        log::warn!("↩️ [OPTIMISTIC] Backend rechazó el cambio, revirtiendo");
        revert();
    }
    result
}
