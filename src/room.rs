/*
 * This file is a part of nsd
 * nsd is a free and open-source concurrent in-memory folder namespace
 * maintained by the nsd contributors.
 *
 * Copyright (c) 2024, nsd contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

//! `ROOM`: the per-node readers/writers coordination primitive.
//!
//! One mutex guarding plain counters, two condition variables (`r_cond` for
//! waiting readers, `w_cond` for waiting writers), and a `turn` flag that
//! flips reader preference off whenever a writer has been waiting through a
//! release.

use parking_lot::{Condvar, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    Reader,
    Writer,
}

#[derive(Debug, Default)]
struct RoomState {
    readers_active: u32,
    writers_active: u32,
    readers_waiting: u32,
    writers_waiting: u32,
    turn: Option<Turn>,
}

impl RoomState {
    fn new() -> Self {
        Self {
            turn: Some(Turn::Reader),
            ..Default::default()
        }
    }
}

/// Per-node readers/writers room. Every `Node` embeds exactly one.
#[derive(Debug)]
pub struct Room {
    state: Mutex<RoomState>,
    r_cond: Condvar,
    w_cond: Condvar,
}

impl Default for Room {
    fn default() -> Self {
        Self::new()
    }
}

impl Room {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RoomState::new()),
            r_cond: Condvar::new(),
            w_cond: Condvar::new(),
        }
    }

    /// Blocks until a reader hold can be admitted, then admits it.
    pub fn enter_read(&self) {
        let mut s = self.state.lock();
        while s.writers_active == 1 || (s.writers_waiting > 0 && s.turn == Some(Turn::Writer)) {
            s.readers_waiting += 1;
            self.r_cond.wait(&mut s);
            s.readers_waiting -= 1;
        }
        s.readers_active += 1;
        if s.readers_waiting > 0 {
            self.r_cond.notify_one();
        }
    }

    /// Releases one reader hold.
    pub fn leave_read(&self) {
        let mut s = self.state.lock();
        debug_assert!(s.readers_active > 0);
        s.readers_active -= 1;
        if s.readers_active == 0 && s.writers_waiting > 0 {
            self.w_cond.notify_one();
        }
    }

    /// Blocks until a writer hold can be admitted, then admits it.
    pub fn enter_write(&self) {
        let mut s = self.state.lock();
        s.turn = Some(Turn::Writer);
        while s.readers_active > 0 || s.writers_active == 1 {
            s.writers_waiting += 1;
            self.w_cond.wait(&mut s);
            s.writers_waiting -= 1;
        }
        s.writers_active = 1;
    }

    /// Releases the writer hold.
    pub fn leave_write(&self) {
        let mut s = self.state.lock();
        debug_assert_eq!(s.writers_active, 1);
        s.writers_active = 0;
        if s.readers_waiting > 0 {
            s.turn = Some(Turn::Reader);
            self.r_cond.notify_one();
        } else if s.writers_waiting > 0 {
            self.w_cond.notify_one();
        }
    }

    #[cfg(test)]
    fn readers_active(&self) -> u32 {
        self.state.lock().readers_active
    }

    #[cfg(test)]
    fn writers_active(&self) -> u32 {
        self.state.lock().writers_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn multiple_readers_coexist() {
        let room = Room::new();
        room.enter_read();
        room.enter_read();
        assert_eq!(room.readers_active(), 2);
        room.leave_read();
        room.leave_read();
        assert_eq!(room.readers_active(), 0);
    }

    #[test]
    fn writer_excludes_readers() {
        let room = Arc::new(Room::new());
        room.enter_write();
        assert_eq!(room.writers_active(), 1);

        let got_in = Arc::new(AtomicBool::new(false));
        let room2 = room.clone();
        let got_in2 = got_in.clone();
        let handle = thread::spawn(move || {
            room2.enter_read();
            got_in2.store(true, Ordering::SeqCst);
            room2.leave_read();
        });

        thread::sleep(Duration::from_millis(50));
        assert!(!got_in.load(Ordering::SeqCst));

        room.leave_write();
        handle.join().unwrap();
        assert!(got_in.load(Ordering::SeqCst));
    }

    #[test]
    fn waiting_writer_blocks_new_readers() {
        // Once a writer is waiting, the turn flips so a fresh reader does
        // not jump the queue ahead of it.
        let room = Arc::new(Room::new());
        room.enter_read();

        let writer_done = Arc::new(AtomicBool::new(false));
        let room2 = room.clone();
        let writer_done2 = writer_done.clone();
        let writer = thread::spawn(move || {
            room2.enter_write();
            writer_done2.store(true, Ordering::SeqCst);
            room2.leave_write();
        });

        thread::sleep(Duration::from_millis(50));
        assert!(!writer_done.load(Ordering::SeqCst));

        let late_reader_in = Arc::new(AtomicBool::new(false));
        let room3 = room.clone();
        let late_reader_in2 = late_reader_in.clone();
        let late_reader = thread::spawn(move || {
            room3.enter_read();
            late_reader_in2.store(true, Ordering::SeqCst);
            room3.leave_read();
        });

        thread::sleep(Duration::from_millis(50));
        assert!(!late_reader_in.load(Ordering::SeqCst));

        room.leave_read();
        writer.join().unwrap();
        late_reader.join().unwrap();
        assert!(writer_done.load(Ordering::SeqCst));
        assert!(late_reader_in.load(Ordering::SeqCst));
    }
}
