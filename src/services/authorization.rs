//! Núcleo de autorización
//!
//! Decisiones puras de acceso: dado el rol del actor, su departamento y
//! el departamento dueño del recurso, permitir o denegar. Todos los
//! servicios de dominio pasan por aquí; ningún servicio re-deriva la
//! matriz de roles por su cuenta.

use uuid::Uuid;

use crate::dto::messages::{
    MANAGER_DEPARTMENT_NOT_EQUAL_AS_PROJECT_DEPARTMENT, UNAUTHORIZED_USER_TO_ACCESS_THE_PROJECT,
    USER_UNAUTHORIZED,
};
use crate::models::user::Role;
use crate::utils::errors::{AppError, AppResult};

/// Resultado de una decisión de acceso
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied(&'static str),
}

impl Access {
    /// Convertir la decisión en resultado: Denied -> 401 Unauthorized
    pub fn into_result(self) -> AppResult<()> {
        match self {
            Access::Granted => Ok(()),
            Access::Denied(reason) => Err(AppError::Unauthorized(reason.to_string())),
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted)
    }
}

/// Alcance de un listado según rol y departamento del actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Sin restricción (admin)
    All,
    /// Solo el departamento propio
    Department(Uuid),
    /// Actor sin departamento asignado: conjunto vacío, nunca un panic
    Nothing,
}

/// Alcance de lectura para listados: admin ve todo, el resto su
/// departamento (o nada si no tiene uno asignado).
pub fn list_scope(role: Role, actor_department: Option<Uuid>) -> ListScope {
    match role {
        Role::Admin => ListScope::All,
        _ => match actor_department {
            Some(department_id) => ListScope::Department(department_id),
            None => ListScope::Nothing,
        },
    }
}

/// Alcance de los listados de proyectos: manager y admin ven todos los
/// proyectos visibles; empleados (y big_boss) solo su departamento.
/// Filtra, no deniega.
pub fn project_list_scope(role: Role, actor_department: Option<Uuid>) -> ListScope {
    match role {
        Role::Admin | Role::Manager => ListScope::All,
        Role::Employee | Role::BigBoss => list_scope(role, actor_department),
    }
}

/// Lectura de un proyecto puntual: todo rol no-admin debe pertenecer
/// al departamento del proyecto.
pub fn can_view_project(
    role: Role,
    actor_department: Option<Uuid>,
    project_department: Uuid,
) -> Access {
    match role {
        Role::Admin => Access::Granted,
        _ => {
            if actor_department == Some(project_department) {
                Access::Granted
            } else {
                Access::Denied(UNAUTHORIZED_USER_TO_ACCESS_THE_PROJECT)
            }
        }
    }
}

/// Lectura de las metas de un proyecto: solo los empleados (y el rol
/// reservado big_boss) quedan acotados a su departamento; manager y
/// admin leen metas de cualquier departamento.
pub fn can_view_project_goals(
    role: Role,
    actor_department: Option<Uuid>,
    project_department: Uuid,
) -> Access {
    match role {
        Role::Admin | Role::Manager => Access::Granted,
        Role::Employee | Role::BigBoss => {
            if actor_department == Some(project_department) {
                Access::Granted
            } else {
                Access::Denied(UNAUTHORIZED_USER_TO_ACCESS_THE_PROJECT)
            }
        }
    }
}

/// Mutación de un proyecto o de sus recursos dependientes (metas,
/// membresías): admin siempre; manager solo dentro de su departamento;
/// cualquier otro rol queda denegado.
pub fn can_mutate_project(
    role: Role,
    actor_department: Option<Uuid>,
    project_department: Uuid,
) -> Access {
    match role {
        Role::Admin => Access::Granted,
        Role::Manager => {
            if actor_department == Some(project_department) {
                Access::Granted
            } else {
                Access::Denied(MANAGER_DEPARTMENT_NOT_EQUAL_AS_PROJECT_DEPARTMENT)
            }
        }
        Role::Employee | Role::BigBoss => Access::Denied(USER_UNAUTHORIZED),
    }
}

/// Actualización de perfil de usuario: el propio usuario o un admin.
pub fn can_update_user(actor_role: Role, actor_id: Uuid, target_id: Uuid) -> Access {
    if actor_role == Role::Admin || actor_id == target_id {
        Access::Granted
    } else {
        Access::Denied(USER_UNAUTHORIZED)
    }
}

/// Departamento efectivo al crear un proyecto: el admin debe indicarlo,
/// al manager se le fuerza el suyo (lo que venga en el request se
/// ignora), y el resto de roles no crea proyectos.
pub fn department_for_new_project(
    role: Role,
    actor_department: Option<Uuid>,
    requested_department: Option<Uuid>,
) -> AppResult<Uuid> {
    use crate::dto::messages::INVALID_DEPARTMENT_ID;

    match role {
        Role::Admin => requested_department
            .ok_or_else(|| AppError::BadRequest(INVALID_DEPARTMENT_ID.to_string())),
        Role::Manager => actor_department
            .ok_or_else(|| AppError::BadRequest(INVALID_DEPARTMENT_ID.to_string())),
        Role::Employee | Role::BigBoss => {
            Err(AppError::Unauthorized(USER_UNAUTHORIZED.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dept() -> Uuid {
        Uuid::new_v4()
    }

    #[test]
    fn test_admin_unrestricted() {
        let resource = dept();
        assert!(can_view_project(Role::Admin, None, resource).is_granted());
        assert!(can_view_project_goals(Role::Admin, None, resource).is_granted());
        assert!(can_mutate_project(Role::Admin, None, resource).is_granted());
        assert_eq!(list_scope(Role::Admin, None), ListScope::All);
    }

    #[test]
    fn test_manager_writes_only_own_department() {
        let own = dept();
        let foreign = dept();

        assert!(can_mutate_project(Role::Manager, Some(own), own).is_granted());
        assert_eq!(
            can_mutate_project(Role::Manager, Some(own), foreign),
            Access::Denied(MANAGER_DEPARTMENT_NOT_EQUAL_AS_PROJECT_DEPARTMENT)
        );
    }

    #[test]
    fn test_manager_reads_goals_anywhere_but_not_single_project() {
        let own = dept();
        let foreign = dept();

        assert!(can_view_project_goals(Role::Manager, Some(own), foreign).is_granted());
        assert_eq!(
            can_view_project(Role::Manager, Some(own), foreign),
            Access::Denied(UNAUTHORIZED_USER_TO_ACCESS_THE_PROJECT)
        );
    }

    #[test]
    fn test_employee_read_only_own_department() {
        let own = dept();
        let foreign = dept();

        assert!(can_view_project(Role::Employee, Some(own), own).is_granted());
        assert_eq!(
            can_view_project(Role::Employee, Some(own), foreign),
            Access::Denied(UNAUTHORIZED_USER_TO_ACCESS_THE_PROJECT)
        );
        assert_eq!(
            can_mutate_project(Role::Employee, Some(own), own),
            Access::Denied(USER_UNAUTHORIZED)
        );
        assert_eq!(list_scope(Role::Employee, Some(own)), ListScope::Department(own));
    }

    #[test]
    fn test_actor_without_department_gets_empty_scope() {
        let resource = dept();

        assert_eq!(list_scope(Role::Employee, None), ListScope::Nothing);
        assert_eq!(list_scope(Role::Manager, None), ListScope::Nothing);
        assert_eq!(
            can_view_project(Role::Employee, None, resource),
            Access::Denied(UNAUTHORIZED_USER_TO_ACCESS_THE_PROJECT)
        );
        assert_eq!(
            can_mutate_project(Role::Manager, None, resource),
            Access::Denied(MANAGER_DEPARTMENT_NOT_EQUAL_AS_PROJECT_DEPARTMENT)
        );
    }

    #[test]
    fn test_big_boss_is_reserved_not_admin() {
        let own = dept();
        let foreign = dept();

        // big_boss no hereda privilegios de admin ni de manager
        assert_eq!(
            can_mutate_project(Role::BigBoss, Some(own), own),
            Access::Denied(USER_UNAUTHORIZED)
        );
        assert_eq!(
            can_view_project(Role::BigBoss, Some(own), foreign),
            Access::Denied(UNAUTHORIZED_USER_TO_ACCESS_THE_PROJECT)
        );
        assert!(can_view_project(Role::BigBoss, Some(own), own).is_granted());
    }

    #[test]
    fn test_membership_changes_follow_project_department() {
        let own = dept();
        let foreign = dept();

        // alta y baja de miembros se deciden como cualquier otra
        // escritura sobre el proyecto dueño
        assert!(can_mutate_project(Role::Admin, None, foreign).is_granted());
        assert!(can_mutate_project(Role::Manager, Some(own), own).is_granted());
        assert_eq!(
            can_mutate_project(Role::Manager, Some(own), foreign),
            Access::Denied(MANAGER_DEPARTMENT_NOT_EQUAL_AS_PROJECT_DEPARTMENT)
        );
    }

    #[test]
    fn test_user_profile_self_or_admin() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();

        assert!(can_update_user(Role::Employee, me, me).is_granted());
        assert!(can_update_user(Role::Admin, me, other).is_granted());
        assert_eq!(
            can_update_user(Role::Manager, me, other),
            Access::Denied(USER_UNAUTHORIZED)
        );
    }

    #[test]
    fn test_department_for_new_project() {
        let own = dept();
        let requested = dept();

        // admin: el department_id del request es obligatorio y se honra
        assert_eq!(
            department_for_new_project(Role::Admin, None, Some(requested)).unwrap(),
            requested
        );
        assert!(department_for_new_project(Role::Admin, None, None).is_err());

        // manager: se fuerza el propio, lo pedido se ignora
        assert_eq!(
            department_for_new_project(Role::Manager, Some(own), Some(requested)).unwrap(),
            own
        );
        assert!(department_for_new_project(Role::Manager, None, Some(requested)).is_err());

        assert!(department_for_new_project(Role::Employee, Some(own), Some(own)).is_err());
    }
}
