use minesweeper_ai as ms;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn create_game(
    height: usize,
    width: usize,
    mines: usize,
    row: usize,
    col: usize,
) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let config = ms::SolverConfig::default().with_total_mines(mines);
    let session = ms::Session::new(
        ms::Board::new(height, width),
        mines,
        config,
        ms::Point::new(row, col),
        &mut rand::rng(),
    )
    .map_err(|e| e.to_string())?;
    session.serialize().map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn validate(bts: Vec<u8>) -> Result<bool, String> {
    console_error_panic_hook::set_once();

    let session = ms::Session::deserialize(&bts).map_err(|e| e.to_string())?;
    Ok(session.game.game_state == ms::GameState::Won)
}

/// Reveals a cell. The last byte of the result is 1 if a mine was hit.
#[wasm_bindgen]
pub fn choose_cell(bts: Vec<u8>, row: usize, col: usize) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let mut session = ms::Session::deserialize(&bts).map_err(|e| e.to_string())?;
    let res = session
        .reveal(ms::Point::new(row, col))
        .map_err(|e| e.to_string())?;
    let mut xs = session.serialize().map_err(|e| e.to_string())?;
    xs.push(if res { 0 } else { 1 });
    Ok(xs)
}

#[wasm_bindgen]
pub fn toggle_flag(bts: Vec<u8>, row: usize, col: usize) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let mut session = ms::Session::deserialize(&bts).map_err(|e| e.to_string())?;
    session
        .toggle_flag(ms::Point::new(row, col))
        .map_err(|e| e.to_string())?;
    session.serialize().map_err(|e| e.to_string())
}

/// The engine's suggestion as `[row, col, is_flag, is_certain]`, or empty when
/// nothing is left to do.
#[wasm_bindgen]
pub fn hint(bts: Vec<u8>) -> Result<Vec<u32>, String> {
    console_error_panic_hook::set_once();

    let mut session = ms::Session::deserialize(&bts).map_err(|e| e.to_string())?;
    let next = session
        .hint(&mut rand::rng())
        .map_err(|e| e.to_string())?;
    Ok(match next {
        Some(m) => vec![
            m.cell.row as u32,
            m.cell.col as u32,
            m.is_flag() as u32,
            m.certain as u32,
        ],
        None => Vec::new(),
    })
}

#[wasm_bindgen]
pub fn get_cells(bts: Vec<u8>) -> Result<Vec<i8>, String> {
    console_error_panic_hook::set_once();

    let session = ms::Session::deserialize(&bts).map_err(|e| e.to_string())?;
    Ok(session
        .game
        .tiles
        .into_iter()
        .flat_map(|row| {
            row.into_iter().map(|tile| match tile {
                ms::Tile::Hidden => -1,
                ms::Tile::Flagged => -2,
                ms::Tile::Revealed(n) => n as i8,
            })
        })
        .collect())
}
