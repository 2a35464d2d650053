//! Localized names of the host's "Recently Deleted" folder.

/// Folder names the host application uses for its trash folder, one per
/// locale. Notes filed under any of these are never listed.
pub const RECENTLY_DELETED: &[&str] = &[
    "Recently Deleted",
    "Nylig slettet",
    "Senast raderade",
    "Senest slettet",
    "Zuletzt gelöscht",
    "Supprimés récemment",
    "Eliminados recientemente",
    "Eliminati di recente",
    "Recent verwijderd",
    "Ostatnio usunięte",
    "Недавно удалённые",
    "Apagados recentemente",
    "Apagadas recentemente",
    "最近删除",
    "最近刪除",
    "最近削除した項目",
    "최근 삭제된 항목",
    "Son Silinenler",
    "Äskettäin poistetut",
    "Nedávno smazané",
    "Πρόσφατα διαγραμμένα",
    "Nemrég töröltek",
    "Șterse recent",
    "Nedávno vymazané",
    "เพิ่งลบ",
    "Đã xóa gần đây",
    "Нещодавно видалені",
];

/// Returns whether a folder name is one of the trash folder translations.
pub fn is_recently_deleted(folder: &str) -> bool {
    RECENTLY_DELETED.contains(&folder)
}
