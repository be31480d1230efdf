use minesweeper_ai as ms;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn create_ai(height: u8, width: u8) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let ai = ms::MinesweeperAi::new(height as usize, width as usize);
    ai.serialize().map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn add_knowledge(
    bts: Vec<u8>,
    row: usize,
    col: usize,
    count: usize,
) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let mut ai = ms::MinesweeperAi::deserialize(&bts).map_err(|e| e.to_string())?;
    ai.add_knowledge(ms::Cell { row, col }, count)
        .map_err(|e| e.to_string())?;
    ai.serialize().map_err(|e| e.to_string())
}

/// `[row, col, kind]` where kind is 0 for a proven safe move and 1 for a
/// guess, or empty when no move is left.
#[wasm_bindgen]
pub fn next_move(bts: Vec<u8>) -> Result<Vec<usize>, String> {
    console_error_panic_hook::set_once();

    let ai = ms::MinesweeperAi::deserialize(&bts).map_err(|e| e.to_string())?;
    let choice = match ai.make_safe_move() {
        Some(cell) => Some((cell, 0)),
        None => ai.make_random_move(&mut rand::rng()).map(|cell| (cell, 1)),
    };
    Ok(match choice {
        Some((cell, kind)) => vec![cell.row, cell.col, kind],
        None => Vec::new(),
    })
}

#[wasm_bindgen]
pub fn known_mines(bts: Vec<u8>) -> Result<Vec<usize>, String> {
    console_error_panic_hook::set_once();

    let ai = ms::MinesweeperAi::deserialize(&bts).map_err(|e| e.to_string())?;
    Ok(flatten(ai.mines()))
}

#[wasm_bindgen]
pub fn known_safes(bts: Vec<u8>) -> Result<Vec<usize>, String> {
    console_error_panic_hook::set_once();

    let ai = ms::MinesweeperAi::deserialize(&bts).map_err(|e| e.to_string())?;
    Ok(flatten(ai.safes()))
}

/// Sorted cells as `[row, col, row, col, ...]`.
fn flatten<'a>(cells: impl IntoIterator<Item = &'a ms::Cell>) -> Vec<usize> {
    let mut cells: Vec<ms::Cell> = cells.into_iter().copied().collect();
    cells.sort();
    cells
        .into_iter()
        .flat_map(|cell| [cell.row, cell.col])
        .collect()
}
