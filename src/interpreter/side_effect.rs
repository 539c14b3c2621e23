use super::Interpreter;
use crate::environment::Address;
use crate::error::{RevertReason, RuntimeError};
use crate::field::Fr;
use crate::gas::GasUnit;
use crate::side_effect::SideEffect;
use crate::storage::StateManager;

impl<S> Interpreter<'_, S> {
    /// Fail if the frame isn't allowed to modify the state.
    pub(crate) fn assert_not_static(&self) -> Result<(), RevertReason> {
        if self.environment.is_static_call() {
            return Err(RevertReason::StaticCallStateModification);
        }

        Ok(())
    }

    fn emit(&mut self, side_effect: SideEffect) {
        self.side_effects.push(side_effect);
        self.machine.inc_pc();
    }

    pub(crate) fn emit_note_hash(&mut self, note_hash: u32) -> Result<(), RuntimeError> {
        self.assert_not_static()?;

        let side_effect = SideEffect::NoteHash {
            address: self.environment.address().clone(),
            value: self.machine.read_memory(note_hash),
        };

        self.emit(side_effect);

        Ok(())
    }

    pub(crate) fn emit_unencrypted_log(&mut self, log: u32, log_size: u32) -> Result<(), RuntimeError> {
        self.assert_not_static()?;

        let size = self.read_u32(log_size)?;

        self.check_window(log, size)?;
        self.gas_charge(GasUnit::MemoryRead(size as u64).cost())?;

        let side_effect = SideEffect::UnencryptedLog {
            address: self.environment.address().clone(),
            data: self.machine.read_slice(log, size)?,
        };

        self.emit(side_effect);

        Ok(())
    }

    pub(crate) fn send_l2_to_l1_message(&mut self, recipient: u32, content: u32) -> Result<(), RuntimeError> {
        self.assert_not_static()?;

        let side_effect = SideEffect::L2ToL1Message {
            sender: self.environment.address().clone(),
            recipient: self.machine.read_memory(recipient),
            content: self.machine.read_memory(content),
        };

        self.emit(side_effect);

        Ok(())
    }
}

impl<S> Interpreter<'_, S>
where
    S: StateManager,
{
    pub(crate) fn emit_nullifier(&mut self, nullifier: u32) -> Result<(), RuntimeError> {
        self.assert_not_static()?;

        let address = self.environment.address().clone();
        let nullifier = self.machine.read_memory(nullifier);

        if self
            .storage
            .nullifier_exists(&address, &nullifier)
            .map_err(RuntimeError::from_io)?
        {
            tracing::debug!(%address, %nullifier, "duplicate nullifier");

            return Err(RevertReason::DuplicateNullifier.into());
        }

        self.storage
            .nullifier_write(&address, nullifier.clone())
            .map_err(RuntimeError::from_io)?;

        self.emit(SideEffect::Nullifier {
            address,
            value: nullifier,
        });

        Ok(())
    }

    pub(crate) fn nullifier_exists(&mut self, nullifier: u32, address: u32, dst: u32) -> Result<(), RuntimeError> {
        let nullifier = self.machine.read_memory(nullifier);
        let address = Address::from(self.machine.read_memory(address));

        let exists = self
            .storage
            .nullifier_exists(&address, &nullifier)
            .map_err(RuntimeError::from_io)?;

        self.machine.write_memory(dst, Fr::from(exists));
        self.machine.inc_pc();

        Ok(())
    }
}
